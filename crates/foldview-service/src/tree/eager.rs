//! Full-tree traversal with re-parenting around hidden folders.

use std::collections::HashMap;

use tracing::debug;

use foldview_auth::VisibilityClassifier;
use foldview_core::error::AppError;
use foldview_core::result::AppResult;
use foldview_core::types::FolderId;
use foldview_entity::folder::{PresentedNode, TreeSnapshot};

use super::index::{DescendantIndex, Visit};
use super::presenter::NodePresenter;

/// Emits every non-hidden folder of a snapshot in pre-order.
///
/// Each folder hangs under the nearest emitted ancestor. The value is
/// derived from the listing parent's own value, so hidden folders pass
/// their parent's anchor down unchanged and an emitted folder becomes the
/// anchor for its subtree.
#[derive(Debug, Clone, Copy)]
pub struct EagerWalker<'a> {
    snapshot: &'a TreeSnapshot,
    index: &'a DescendantIndex,
    classifier: VisibilityClassifier<'a>,
    presenter: NodePresenter<'a>,
}

impl<'a> EagerWalker<'a> {
    /// Create a walker over a verified snapshot.
    pub fn new(
        snapshot: &'a TreeSnapshot,
        index: &'a DescendantIndex,
        classifier: VisibilityClassifier<'a>,
        presenter: NodePresenter<'a>,
    ) -> Self {
        Self {
            snapshot,
            index,
            classifier,
            presenter,
        }
    }

    /// Walk `visits` (a pre-order of the snapshot) and present each folder.
    pub fn walk(&self, visits: &[Visit]) -> AppResult<Vec<PresentedNode>> {
        let anchor = self.snapshot.anchor();
        let mut hang_under: HashMap<FolderId, FolderId> = HashMap::with_capacity(visits.len() + 1);
        hang_under.insert(anchor, anchor);
        let mut out = Vec::with_capacity(visits.len());

        for visit in visits {
            let folder = self.snapshot.get(visit.id).ok_or_else(|| {
                AppError::invalid_hierarchy(format!("Folder {} missing from snapshot", visit.id))
            })?;
            let parent_anchor = hang_under.get(&visit.parent).copied().ok_or_else(|| {
                AppError::invalid_hierarchy(format!(
                    "Folder {} visited before its parent {}",
                    visit.id, visit.parent
                ))
            })?;

            let stats = self.index.stats(visit.id);
            let verdict = self.classifier.classify(folder, &stats.reachability());

            match self.presenter.present(folder, verdict, &stats, parent_anchor) {
                Some(node) => {
                    hang_under.insert(visit.id, visit.id);
                    out.push(node);
                }
                None => {
                    debug!(
                        folder_id = %visit.id,
                        reparent_to = %parent_anchor,
                        "Eliding hidden folder"
                    );
                    hang_under.insert(visit.id, parent_anchor);
                }
            }
        }

        Ok(out)
    }
}
