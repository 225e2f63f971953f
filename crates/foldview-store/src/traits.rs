//! Tree store trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use foldview_core::result::AppResult;
use foldview_core::types::FolderId;
use foldview_entity::folder::Folder;

/// Read-only access to the folder hierarchy.
///
/// Implementations must tolerate concurrent calls from independent renders.
/// Failures to reach the backing storage are reported as
/// `ErrorKind::StoreUnavailable`; cyclic data found while walking
/// descendants is reported as `ErrorKind::InvalidHierarchy`.
#[async_trait]
pub trait TreeStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by id. The root sentinel has no record.
    async fn get_node(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of a folder (or of the root sentinel) in display order.
    async fn get_direct_children(&self, id: FolderId) -> AppResult<Vec<Folder>>;

    /// Descendants of a folder in pre-order.
    ///
    /// `transitive = false` limits the result to direct children.
    /// `include_self` is ignored for the root sentinel.
    async fn get_descendants(
        &self,
        id: FolderId,
        include_self: bool,
        transitive: bool,
    ) -> AppResult<Vec<Folder>>;

    /// Count direct child folders.
    async fn count_direct_children(&self, id: FolderId) -> AppResult<u64>;

    /// Count active items filed directly under a folder.
    async fn count_items(&self, id: FolderId) -> AppResult<u64>;

    /// Count active items for many folders at once.
    async fn count_items_batch(&self, ids: &[FolderId]) -> AppResult<HashMap<FolderId, u64>> {
        let mut counts = HashMap::with_capacity(ids.len());
        for id in ids {
            counts.insert(*id, self.count_items(*id).await?);
        }
        Ok(counts)
    }

    /// When the hierarchy last changed, if the store tracks it.
    async fn last_change(&self) -> AppResult<Option<DateTime<Utc>>>;
}
