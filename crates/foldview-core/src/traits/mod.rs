//! Core traits defined in `foldview-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
