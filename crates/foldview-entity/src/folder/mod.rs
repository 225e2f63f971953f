//! Folder domain entities.

pub mod model;
pub mod presented;
pub mod tree;

pub use model::{Folder, FolderRecord};
pub use presented::{AccessLevel, FolderClass, NodeMarker, PresentedNode};
pub use tree::TreeSnapshot;
