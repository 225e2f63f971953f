//! Tree rendering handlers.

use axum::Json;
use axum::extract::{Path, State};

use foldview_auth::DisplaySettings;
use foldview_core::types::{FolderId, UserId};
use foldview_service::RenderRequest;

use crate::dto::request::TreeRequest;
use crate::dto::response::{ApiResponse, InvalidateResponse, TreeResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/tree
pub async fn render_tree(
    State(state): State<AppState>,
    Json(body): Json<TreeRequest>,
) -> Result<Json<TreeResponse>, ApiError> {
    let tree_config = &state.config.tree;
    let access = body.access.into_context(DisplaySettings::from(tree_config));
    let strategy = body.strategy.unwrap_or(tree_config.default_strategy);

    let request = RenderRequest::new(access, strategy)
        .with_node(body.node_id.unwrap_or(FolderId::ROOT))
        .with_force_refresh(body.force_refresh);

    let rendered = state.refresh_service.render(&request).await?;
    Ok(Json(TreeResponse::from(rendered)))
}

/// DELETE /api/tree/cache/{user_id}
pub async fn invalidate_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> Result<Json<ApiResponse<InvalidateResponse>>, ApiError> {
    let removed = state
        .refresh_service
        .invalidate_user(UserId(user_id))
        .await?;
    Ok(Json(ApiResponse::ok(InvalidateResponse { removed })))
}

/// DELETE /api/tree/cache
pub async fn invalidate_all(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.refresh_service.invalidate_all().await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Tree cache cleared" } }),
    ))
}
