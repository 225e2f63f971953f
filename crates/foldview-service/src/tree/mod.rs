//! Folder tree rendering.

pub mod eager;
pub mod index;
pub mod lazy;
pub mod presenter;
pub mod refresh;
pub mod service;

pub use eager::EagerWalker;
pub use index::{DescendantIndex, NodeStats, Visit, preorder};
pub use lazy::LazyExpander;
pub use presenter::{DefaultMessages, Messages, NodePresenter, decode_entities};
pub use refresh::{RenderedTree, TreeRefreshService};
pub use service::TreeService;
