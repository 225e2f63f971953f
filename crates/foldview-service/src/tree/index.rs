//! Checked pre-order traversal and per-folder subtree aggregates.
//!
//! Both are computed once per render so that no folder's subtree is
//! re-walked for each of its ancestors.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use foldview_auth::{AccessContext, Reachability};
use foldview_core::error::AppError;
use foldview_core::result::AppResult;
use foldview_core::types::FolderId;
use foldview_entity::folder::TreeSnapshot;

/// One step of a pre-order traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Folder visited.
    pub id: FolderId,
    /// Folder (or anchor) that lists it as a child.
    pub parent: FolderId,
    /// Distance from the snapshot anchor; its children are at depth 1.
    pub depth: usize,
}

/// Walk a snapshot from its anchor in pre-order, verifying the hierarchy.
///
/// Fails with `InvalidHierarchy` when a folder is reached twice, a listed
/// child has no record, a child's `parent_id` disagrees with the folder
/// listing it, or the walk goes deeper than `max_depth`.
pub fn preorder(snapshot: &TreeSnapshot, max_depth: usize) -> AppResult<Vec<Visit>> {
    let anchor = snapshot.anchor();
    let mut order = Vec::with_capacity(snapshot.len());
    let mut seen: HashSet<FolderId> = HashSet::with_capacity(snapshot.len());
    let mut stack: Vec<Visit> = snapshot
        .children_of(anchor)
        .iter()
        .rev()
        .map(|child| Visit {
            id: *child,
            parent: anchor,
            depth: 1,
        })
        .collect();

    while let Some(visit) = stack.pop() {
        if visit.id == anchor || !seen.insert(visit.id) {
            warn!(folder_id = %visit.id, "Folder reached twice during traversal");
            return Err(AppError::invalid_hierarchy(format!(
                "Folder {} is reachable more than once",
                visit.id
            )));
        }
        if visit.depth > max_depth {
            warn!(folder_id = %visit.id, depth = visit.depth, max_depth, "Hierarchy too deep");
            return Err(AppError::invalid_hierarchy(format!(
                "Folder {} lies deeper than the limit of {max_depth}",
                visit.id
            )));
        }
        let folder = snapshot.get(visit.id).ok_or_else(|| {
            AppError::invalid_hierarchy(format!(
                "Folder {} lists unknown child {}",
                visit.parent, visit.id
            ))
        })?;
        if folder.parent_id != visit.parent {
            return Err(AppError::invalid_hierarchy(format!(
                "Folder {} is listed under {} but names {} as its parent",
                visit.id, visit.parent, folder.parent_id
            )));
        }

        order.push(visit);
        stack.extend(folder.children.iter().rev().map(|child| Visit {
            id: *child,
            parent: visit.id,
            depth: visit.depth + 1,
        }));
    }

    Ok(order)
}

/// Aggregates over one folder's subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Items filed directly in the folder.
    pub items: u64,
    /// Items across the subtree (self included) in folders whose items the
    /// user can count: visible or restricted-for-items.
    pub descendant_items: u64,
    /// Folders in the subtree, self included.
    pub subtree_folders: usize,
    /// Strict descendants the user can reach (personal or positive grant,
    /// other users' personal folders excluded).
    pub accessible_descendants: usize,
    /// Direct children reached through a positive grant.
    pub granted_children: usize,
}

impl NodeStats {
    /// Strict descendant folders.
    pub fn descendant_folders(&self) -> usize {
        self.subtree_folders.saturating_sub(1)
    }

    /// The reachability facts the classifier consults.
    pub fn reachability(&self) -> Reachability {
        Reachability {
            accessible_descendants: self.accessible_descendants,
            granted_children: self.granted_children,
        }
    }
}

/// Subtree aggregates for every folder of a snapshot.
#[derive(Debug, Clone, Default)]
pub struct DescendantIndex {
    stats: HashMap<FolderId, NodeStats>,
}

impl DescendantIndex {
    /// Fold a pre-order traversal of `snapshot` bottom-up into per-folder
    /// aggregates.
    pub fn build(
        snapshot: &TreeSnapshot,
        visits: &[Visit],
        items: &HashMap<FolderId, u64>,
        ctx: &AccessContext,
    ) -> Self {
        let anchor = snapshot.anchor();
        let mut stats: HashMap<FolderId, NodeStats> = HashMap::with_capacity(visits.len());

        // Reverse pre-order sees every child before its parent.
        for visit in visits.iter().rev() {
            let own_items = items.get(&visit.id).copied().unwrap_or(0);
            let own = stats.entry(visit.id).or_default();
            own.items = own_items;
            own.subtree_folders += 1;
            if ctx.counts_items(visit.id) {
                own.descendant_items += own_items;
            }
            let done = *own;

            if visit.parent == anchor {
                continue;
            }
            let folder = snapshot.get(visit.id);
            let reached = folder.is_some_and(|f| ctx.reaches(f));
            let granted = folder.is_some_and(|f| ctx.reaches_by_grant(f));

            let parent = stats.entry(visit.parent).or_default();
            parent.subtree_folders += done.subtree_folders;
            parent.descendant_items += done.descendant_items;
            parent.accessible_descendants += done.accessible_descendants + usize::from(reached);
            parent.granted_children += usize::from(granted);
        }

        Self { stats }
    }

    /// Aggregates for one folder; zeroes when the folder is not indexed.
    pub fn stats(&self, id: FolderId) -> NodeStats {
        self.stats.get(&id).copied().unwrap_or_default()
    }

    /// Number of indexed folders.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
