//! One-level expansion for on-demand UI loading.

use tracing::debug;

use foldview_auth::{Verdict, VisibilityClassifier};
use foldview_core::error::AppError;
use foldview_core::result::AppResult;
use foldview_core::types::FolderId;
use foldview_entity::folder::{Folder, PresentedNode, TreeSnapshot};

use super::index::DescendantIndex;
use super::presenter::NodePresenter;

/// Presents the direct children of one folder.
///
/// Hidden children are left out without re-parenting their own children;
/// those surface only when the UI expands the hidden folder itself.
#[derive(Debug, Clone, Copy)]
pub struct LazyExpander<'a> {
    snapshot: &'a TreeSnapshot,
    index: &'a DescendantIndex,
    classifier: VisibilityClassifier<'a>,
    presenter: NodePresenter<'a>,
}

impl<'a> LazyExpander<'a> {
    /// Create an expander over a verified snapshot that contains the
    /// requested folder's whole subtree.
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

    /// Present the direct children of `node_id`.
    ///
    /// Returns nothing when the requested folder is itself hidden from the
    /// user. The root sentinel is always expandable.
    pub fn expand(&self, node_id: FolderId) -> AppResult<Vec<PresentedNode>> {
        let children: &[FolderId] = if node_id.is_root() {
            self.snapshot.children_of(FolderId::ROOT)
        } else {
            let node = self
                .snapshot
                .get(node_id)
                .ok_or_else(|| AppError::not_found(format!("Folder {node_id} not found")))?;
            if self.verdict(node) == Verdict::Hidden {
                debug!(folder_id = %node_id, "Requested folder is hidden from user");
                return Ok(Vec::new());
            }
            &node.children
        };

        let mut out = Vec::with_capacity(children.len());
        for child_id in children {
            let child = self.snapshot.get(*child_id).ok_or_else(|| {
                AppError::invalid_hierarchy(format!(
                    "Folder {node_id} lists unknown child {child_id}"
                ))
            })?;
            let verdict = self.verdict(child);
            let stats = self.index.stats(child.id);
            match self.presenter.present(child, verdict, &stats, node_id) {
                Some(presented) => out.push(presented),
                None => debug!(folder_id = %child.id, "Skipping hidden child"),
            }
        }

        Ok(out)
    }

    fn verdict(&self, folder: &Folder) -> Verdict {
        self.classifier
            .classify(folder, &self.index.stats(folder.id).reachability())
    }
}
