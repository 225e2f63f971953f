//! Core type definitions used across the foldview workspace.

pub mod id;
pub mod strategy;

pub use id::{FolderId, ItemId, UserId};
pub use strategy::RenderStrategy;
