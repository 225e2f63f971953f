//! Caller-side render cache keyed on the hierarchy's last change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use foldview_cache::CacheManager;
use foldview_cache::keys;
use foldview_core::result::AppResult;
use foldview_core::traits::cache::CacheProvider;
use foldview_core::types::{FolderId, RenderStrategy, UserId};
use foldview_entity::folder::PresentedNode;

use super::service::TreeService;
use crate::context::RenderRequest;

/// A render result plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTree {
    /// Strategy used.
    pub strategy: RenderStrategy,
    /// Folder rendered from.
    pub node_id: FolderId,
    /// Hierarchy change the render reflects.
    pub last_change: Option<DateTime<Utc>>,
    /// Whether the nodes were served from the cache.
    pub cached: bool,
    /// Presented folders in output order.
    pub nodes: Vec<PresentedNode>,
}

/// Reuses earlier renders while the hierarchy and settings are unchanged.
///
/// Entries are keyed by user, configuration version, last hierarchy change,
/// strategy and node, so a newer change or a bumped configuration version
/// simply misses. Changes to a user's grants are not visible in the key;
/// call [`TreeRefreshService::invalidate_user`] when they change.
#[derive(Debug, Clone)]
pub struct TreeRefreshService {
    /// Renderer.
    tree: Arc<TreeService>,
    /// Render cache.
    cache: Arc<CacheManager>,
}

impl TreeRefreshService {
    /// Creates a new refresh service.
    pub fn new(tree: Arc<TreeService>, cache: Arc<CacheManager>) -> Self {
        Self { tree, cache }
    }

    /// The wrapped renderer.
    pub fn tree(&self) -> &Arc<TreeService> {
        &self.tree
    }

    /// Render, reusing a cached result unless the request forces a refresh.
    ///
    /// Cache failures are logged and the tree is computed instead.
    pub async fn render(&self, request: &RenderRequest) -> AppResult<RenderedTree> {
        let user_id = request.access.user_id();
        let node_id = request.effective_node();
        let last_change = self.tree.store().last_change().await?;
        let key = keys::tree_structure(
            user_id,
            self.tree.config().config_version,
            last_change.map(|ts| ts.timestamp()).unwrap_or(0),
            request.strategy,
            node_id,
        );

        if request.force_refresh {
            debug!(key = %key, "Forced tree refresh");
        } else {
            match self.cache.get_json::<Vec<PresentedNode>>(&key).await {
                Ok(Some(nodes)) => {
                    debug!(key = %key, nodes = nodes.len(), "Tree cache hit");
                    return Ok(RenderedTree {
                        strategy: request.strategy,
                        node_id,
                        last_change,
                        cached: true,
                        nodes,
                    });
                }
                Ok(None) => debug!(key = %key, "Tree cache miss"),
                Err(e) => warn!(key = %key, error = %e, "Tree cache read failed, recomputing"),
            }
        }

        let nodes = self
            .tree
            .render(request.strategy, node_id, &request.access)
            .await?;

        if let Err(e) = self.cache.set_json(&key, &nodes).await {
            warn!(key = %key, error = %e, "Failed to cache rendered tree");
        }

        Ok(RenderedTree {
            strategy: request.strategy,
            node_id,
            last_change,
            cached: false,
            nodes,
        })
    }

    /// Drop every cached render of one user.
    pub async fn invalidate_user(&self, user_id: UserId) -> AppResult<u64> {
        let removed = self
            .cache
            .delete_pattern(&keys::user_trees_pattern(user_id))
            .await?;
        info!(user_id = %user_id, removed, "Invalidated cached trees");
        Ok(removed)
    }

    /// Drop every cached render.
    pub async fn invalidate_all(&self) -> AppResult<()> {
        self.cache.flush_all().await?;
        info!("Invalidated all cached trees");
        Ok(())
    }
}
