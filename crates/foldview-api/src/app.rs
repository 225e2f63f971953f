//! Application builder: wires store, cache, and services into an Axum app.

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use foldview_cache::CacheManager;
use foldview_core::config::AppConfig;
use foldview_core::error::{AppError, ErrorKind};
use foldview_service::TreeService;
use foldview_store::{MemoryTreeStore, TreeStore};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Build application state from configuration.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(path = %config.store.fixture_path, "Loading folder hierarchy");
    let store: Arc<dyn TreeStore> = Arc::new(MemoryTreeStore::load(&config.store.fixture_path).await?);

    info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache)?);

    let tree_service = Arc::new(TreeService::new(store, config.tree.clone()));
    Ok(AppState::new(config, tree_service, cache))
}

/// Runs the foldview server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting foldview server...");

    let addr = config.server.bind_address();
    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(address = %addr, "foldview server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("foldview server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
    }
}
