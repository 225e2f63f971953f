//! # foldview-store
//!
//! The [`TreeStore`] trait is everything the renderer asks of the folder
//! hierarchy's backing store. [`MemoryTreeStore`] is an immutable in-process
//! snapshot, loadable from a JSON fixture, that is safe to share across
//! concurrent renders.

pub mod fixture;
pub mod memory;
pub mod traits;

pub use fixture::TreeFixture;
pub use memory::MemoryTreeStore;
pub use traits::TreeStore;
