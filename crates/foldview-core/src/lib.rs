//! # foldview-core
//!
//! Core crate for foldview. Contains the unified error system, typed
//! identifiers, the render strategy switch, configuration schemas, and the
//! cache provider trait.
//!
//! This crate has **no** internal dependencies on other foldview crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
