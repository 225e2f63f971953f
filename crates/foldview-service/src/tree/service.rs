//! Full and single-level tree renders over the tree store.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use foldview_auth::{AccessContext, VisibilityClassifier};
use foldview_core::config::tree::TreeConfig;
use foldview_core::error::AppError;
use foldview_core::result::AppResult;
use foldview_core::types::{FolderId, RenderStrategy};
use foldview_entity::folder::{PresentedNode, TreeSnapshot};
use foldview_store::TreeStore;

use super::eager::EagerWalker;
use super::index::{DescendantIndex, Visit, preorder};
use super::lazy::LazyExpander;
use super::presenter::{DefaultMessages, Messages, NodePresenter};

/// Renders permission-filtered folder trees.
///
/// Renders are pure functions of the access context and the store's current
/// snapshot; nothing is cached here.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder hierarchy.
    store: Arc<dyn TreeStore>,
    /// Render settings.
    config: TreeConfig,
    /// Tooltip strings.
    messages: Arc<dyn Messages>,
}

impl TreeService {
    /// Creates a new tree service with English tooltips.
    pub fn new(store: Arc<dyn TreeStore>, config: TreeConfig) -> Self {
        Self {
            store,
            config,
            messages: Arc::new(DefaultMessages),
        }
    }

    /// Replace the tooltip strings.
    pub fn with_messages(mut self, messages: Arc<dyn Messages>) -> Self {
        self.messages = messages;
        self
    }

    /// Render settings in effect.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn TreeStore> {
        &self.store
    }

    /// Render with the given strategy. `node_id` only matters for lazy renders.
    pub async fn render(
        &self,
        strategy: RenderStrategy,
        node_id: FolderId,
        ctx: &AccessContext,
    ) -> AppResult<Vec<PresentedNode>> {
        match strategy {
            RenderStrategy::Eager => self.render_full(ctx).await,
            RenderStrategy::Lazy => self.render_subtree(node_id, ctx).await,
        }
    }

    /// Render the whole hierarchy in pre-order, re-parenting around hidden folders.
    pub async fn render_full(&self, ctx: &AccessContext) -> AppResult<Vec<PresentedNode>> {
        let started = Instant::now();
        let snapshot = self.root_snapshot().await?;
        let (visits, index) = self.prepare(&snapshot, ctx).await?;

        let nodes = EagerWalker::new(
            &snapshot,
            &index,
            VisibilityClassifier::new(ctx),
            NodePresenter::new(ctx, self.messages.as_ref()),
        )
        .walk(&visits)?;

        info!(
            user_id = %ctx.user_id(),
            strategy = %RenderStrategy::Eager,
            folders = snapshot.len(),
            nodes = nodes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendered folder tree"
        );
        Ok(nodes)
    }

    /// Render the direct children of one folder (the root sentinel included).
    ///
    /// Fails with `NotFound` when the folder does not exist.
    pub async fn render_subtree(
        &self,
        node_id: FolderId,
        ctx: &AccessContext,
    ) -> AppResult<Vec<PresentedNode>> {
        let started = Instant::now();
        let snapshot = if node_id.is_root() {
            self.root_snapshot().await?
        } else {
            let node = self
                .store
                .get_node(node_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {node_id} not found")))?;
            let subtree = self.store.get_descendants(node_id, true, true).await?;
            TreeSnapshot::new(node.parent_id, vec![node_id], subtree)
        };
        let (_, index) = self.prepare(&snapshot, ctx).await?;

        let nodes = LazyExpander::new(
            &snapshot,
            &index,
            VisibilityClassifier::new(ctx),
            NodePresenter::new(ctx, self.messages.as_ref()),
        )
        .expand(node_id)?;

        info!(
            user_id = %ctx.user_id(),
            strategy = %RenderStrategy::Lazy,
            node_id = %node_id,
            nodes = nodes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Expanded folder"
        );
        Ok(nodes)
    }

    async fn root_snapshot(&self) -> AppResult<TreeSnapshot> {
        let top_level = self
            .store
            .get_direct_children(FolderId::ROOT)
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();
        let folders = self
            .store
            .get_descendants(FolderId::ROOT, false, true)
            .await?;
        Ok(TreeSnapshot::new(FolderId::ROOT, top_level, folders))
    }

    async fn prepare(
        &self,
        snapshot: &TreeSnapshot,
        ctx: &AccessContext,
    ) -> AppResult<(Vec<Visit>, DescendantIndex)> {
        let visits = preorder(snapshot, self.config.max_depth)?;
        let ids: Vec<FolderId> = visits.iter().map(|v| v.id).collect();
        let items = self.store.count_items_batch(&ids).await?;
        let index = DescendantIndex::build(snapshot, &visits, &items, ctx);
        Ok((visits, index))
    }
}
