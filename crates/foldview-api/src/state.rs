//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use foldview_cache::CacheManager;
use foldview_core::config::AppConfig;
use foldview_service::{TreeRefreshService, TreeService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Render cache.
    pub cache: Arc<CacheManager>,
    /// Uncached renderer.
    pub tree_service: Arc<TreeService>,
    /// Cached renderer used by the tree endpoint.
    pub refresh_service: Arc<TreeRefreshService>,
}

impl AppState {
    /// Wire services around a tree service and cache.
    pub fn new(config: AppConfig, tree_service: Arc<TreeService>, cache: Arc<CacheManager>) -> Self {
        let refresh_service = Arc::new(TreeRefreshService::new(
            Arc::clone(&tree_service),
            Arc::clone(&cache),
        ));
        Self {
            config: Arc::new(config),
            cache,
            tree_service,
            refresh_service,
        }
    }
}
