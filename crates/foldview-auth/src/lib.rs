//! # foldview-auth
//!
//! Access decisions for folder tree rendering:
//!
//! - **Access context**: an immutable snapshot of one user's folder grants,
//!   built once per request from loosely typed session data.
//! - **Classifier**: the precedence-ordered decision table that maps a
//!   folder plus the access context to a [`Verdict`].

pub mod access;

pub use access::{
    AccessContext, AccessContextBuilder, DisplaySettings, RawAccessContext, ReadOnlyReason,
    Reachability, Verdict, VisibilityClassifier,
};
