//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foldview_core::types::{FolderId, RenderStrategy};
use foldview_entity::folder::PresentedNode;
use foldview_service::RenderedTree;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Cache backend status.
    pub cache: String,
}

/// Render metadata returned next to the nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeMeta {
    /// Strategy used.
    pub strategy: RenderStrategy,
    /// Folder rendered from.
    pub node_id: FolderId,
    /// Served from the render cache.
    pub cached: bool,
    /// Hierarchy change the render reflects.
    pub last_change: Option<DateTime<Utc>>,
}

/// Body of a successful `POST /api/tree`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeResponse {
    /// Always `true`.
    pub success: bool,
    /// Presented folders in display order.
    pub data: Vec<PresentedNode>,
    /// Render metadata.
    pub meta: TreeMeta,
}

impl From<RenderedTree> for TreeResponse {
    fn from(tree: RenderedTree) -> Self {
        Self {
            success: true,
            meta: TreeMeta {
                strategy: tree.strategy,
                node_id: tree.node_id,
                cached: tree.cached,
                last_change: tree.last_change,
            },
            data: tree.nodes,
        }
    }
}

/// Result of a cache invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateResponse {
    /// Cached renders dropped.
    pub removed: u64,
}
