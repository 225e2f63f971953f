//! Access context construction and visibility classification.

pub mod classifier;
pub mod context;
pub mod raw;

pub use classifier::{Reachability, ReadOnlyReason, Verdict, VisibilityClassifier};
pub use context::{AccessContext, AccessContextBuilder, DisplaySettings};
pub use raw::RawAccessContext;
