//! # foldview-api
//!
//! HTTP API layer for foldview built on Axum.
//!
//! Exposes tree rendering to a trusted session gateway: the gateway
//! validates the session and forwards the user's raw access data with each
//! request. Provides routes, request logging, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
