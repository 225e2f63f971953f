//! Immutable hierarchy snapshot used for one render.

use std::collections::HashMap;

use foldview_core::types::FolderId;

use super::model::Folder;

/// Folders fetched for a single render, indexed by id.
///
/// The snapshot is anchored at one folder (or the root sentinel). The
/// anchor's children are kept separately so the virtual root, which has no
/// [`Folder`] record, can still list its top-level folders in order.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    anchor: FolderId,
    anchor_children: Vec<FolderId>,
    folders: HashMap<FolderId, Folder>,
}

impl TreeSnapshot {
    /// Build a snapshot anchored at `anchor` whose direct children are `anchor_children`.
    pub fn new(anchor: FolderId, anchor_children: Vec<FolderId>, folders: Vec<Folder>) -> Self {
        let folders = folders.into_iter().map(|f| (f.id, f)).collect();
        Self {
            anchor,
            anchor_children,
            folders,
        }
    }

    /// The folder (or root sentinel) the snapshot hangs from.
    pub fn anchor(&self) -> FolderId {
        self.anchor
    }

    /// Look up a folder by id.
    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    /// Ordered child ids of a folder; empty when the folder is unknown.
    pub fn children_of(&self, id: FolderId) -> &[FolderId] {
        if id == self.anchor {
            return &self.anchor_children;
        }
        self.folders
            .get(&id)
            .map(|f| f.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of folders in the snapshot.
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Whether the snapshot holds no folders.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
