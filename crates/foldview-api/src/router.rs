//! Route definitions for the foldview HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(tree_routes()).merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Tree rendering and cache control.
fn tree_routes() -> Router<AppState> {
    Router::new()
        .route("/tree", post(handlers::tree::render_tree))
        .route("/tree/cache", delete(handlers::tree::invalidate_all))
        .route(
            "/tree/cache/{user_id}",
            delete(handlers::tree::invalidate_user),
        )
}

/// Health check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
