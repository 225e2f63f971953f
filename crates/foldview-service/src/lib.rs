//! # foldview-service
//!
//! Tree rendering services. [`TreeService`] turns the folder hierarchy and
//! one user's [`AccessContext`](foldview_auth::AccessContext) into an
//! ordered list of presented nodes, either for the whole tree or one level
//! at a time. [`TreeRefreshService`] sits in front of it and reuses earlier
//! renders while the hierarchy is unchanged.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod tree;

pub use context::RenderRequest;
pub use tree::{
    DefaultMessages, Messages, NodePresenter, RenderedTree, TreeRefreshService, TreeService,
};
