//! Request DTOs.

use serde::{Deserialize, Serialize};

use foldview_auth::RawAccessContext;
use foldview_core::types::{FolderId, RenderStrategy};

/// Body of `POST /api/tree`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRequest {
    /// The user's access data as held by the session gateway.
    #[serde(default)]
    pub access: RawAccessContext,
    /// Folder to expand for lazy renders; the root when absent.
    #[serde(default)]
    pub node_id: Option<FolderId>,
    /// Traversal strategy; the configured default when absent.
    #[serde(default)]
    pub strategy: Option<RenderStrategy>,
    /// Ignore any cached render.
    #[serde(default)]
    pub force_refresh: bool,
}
