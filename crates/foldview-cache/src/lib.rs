//! # foldview-cache
//!
//! Cache provider implementations for rendered trees. The in-process
//! provider uses [moka](https://crates.io/crates/moka); the provider is
//! selected at runtime from configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
