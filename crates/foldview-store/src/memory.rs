//! In-memory tree store backed by an immutable folder snapshot.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use foldview_core::error::AppError;
use foldview_core::result::AppResult;
use foldview_core::types::FolderId;
use foldview_entity::folder::Folder;

use crate::fixture::TreeFixture;
use crate::traits::TreeStore;

#[derive(Debug)]
struct Inner {
    folders: HashMap<FolderId, Folder>,
    roots: Vec<FolderId>,
    items: HashMap<FolderId, u64>,
    last_change: Option<DateTime<Utc>>,
}

/// Tree store holding the whole hierarchy in memory.
///
/// Cloning is cheap; clones share the same snapshot.
#[derive(Debug, Clone)]
pub struct MemoryTreeStore {
    inner: Arc<Inner>,
}

impl MemoryTreeStore {
    /// Build a store from folders whose `children` lists are already populated.
    ///
    /// No consistency checks are made; cycles and dangling children surface
    /// as `InvalidHierarchy` when descendants are walked.
    pub fn from_folders(
        folders: Vec<Folder>,
        roots: Vec<FolderId>,
        items: HashMap<FolderId, u64>,
        last_change: Option<DateTime<Utc>>,
    ) -> Self {
        let folders = folders.into_iter().map(|f| (f.id, f)).collect();
        Self {
            inner: Arc::new(Inner {
                folders,
                roots,
                items,
                last_change,
            }),
        }
    }

    /// Build a store from flat fixture rows, deriving child lists from `parent_id`.
    pub fn from_fixture(fixture: TreeFixture) -> AppResult<Self> {
        let mut folders: HashMap<FolderId, Folder> = HashMap::with_capacity(fixture.folders.len());
        let mut order = Vec::with_capacity(fixture.folders.len());
        let mut items = HashMap::new();

        for record in &fixture.folders {
            if record.id.is_root() {
                return Err(AppError::validation("Folder id 0 is reserved for the root"));
            }
            if folders.insert(record.id, record.to_folder()).is_some() {
                return Err(AppError::validation(format!(
                    "Duplicate folder id {} in fixture",
                    record.id
                )));
            }
            if record.items > 0 {
                items.insert(record.id, record.items);
            }
            order.push((record.id, record.parent_id));
        }

        let mut roots = Vec::new();
        for (id, parent_id) in order {
            if parent_id.is_root() {
                roots.push(id);
                continue;
            }
            match folders.get_mut(&parent_id) {
                Some(parent) => parent.children.push(id),
                None => {
                    return Err(AppError::validation(format!(
                        "Folder {id} references unknown parent {parent_id}"
                    )));
                }
            }
        }

        ensure_connected(&folders, &roots)?;

        Ok(Self {
            inner: Arc::new(Inner {
                folders,
                roots,
                items,
                last_change: fixture.last_change,
            }),
        })
    }

    /// Load a fixture file and build a store from it.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let fixture = TreeFixture::load(path).await?;
        let store = Self::from_fixture(fixture)?;
        info!(
            folders = store.len(),
            roots = store.inner.roots.len(),
            "In-memory tree store ready"
        );
        Ok(store)
    }

    /// Number of folders held.
    pub fn len(&self) -> usize {
        self.inner.folders.len()
    }

    /// Whether the store holds no folders.
    pub fn is_empty(&self) -> bool {
        self.inner.folders.is_empty()
    }

    fn child_ids(&self, id: FolderId) -> &[FolderId] {
        if id.is_root() {
            return &self.inner.roots;
        }
        self.inner
            .folders
            .get(&id)
            .map(|f| f.children.as_slice())
            .unwrap_or(&[])
    }

    fn resolve(&self, id: FolderId, listed_under: FolderId) -> AppResult<&Folder> {
        self.inner.folders.get(&id).ok_or_else(|| {
            warn!(folder_id = %id, parent_id = %listed_under, "Dangling child reference");
            AppError::invalid_hierarchy(format!(
                "Folder {listed_under} lists unknown child {id}"
            ))
        })
    }

    fn collect_descendants(&self, id: FolderId, transitive: bool) -> AppResult<Vec<Folder>> {
        let mut out = Vec::new();
        let mut seen: HashSet<FolderId> = HashSet::new();
        let mut stack: Vec<(FolderId, FolderId)> = self
            .child_ids(id)
            .iter()
            .rev()
            .map(|child| (*child, id))
            .collect();

        while let Some((current, listed_under)) = stack.pop() {
            if current == id || !seen.insert(current) {
                warn!(folder_id = %current, "Folder reached twice while walking descendants");
                return Err(AppError::invalid_hierarchy(format!(
                    "Folder {current} is reachable more than once below {id}"
                )));
            }
            let folder = self.resolve(current, listed_under)?;
            if transitive {
                stack.extend(folder.children.iter().rev().map(|child| (*child, current)));
            }
            out.push(folder.clone());
        }

        Ok(out)
    }
}

#[async_trait]
impl TreeStore for MemoryTreeStore {
    async fn get_node(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.inner.folders.get(&id).cloned())
    }

    async fn get_direct_children(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        self.child_ids(id)
            .iter()
            .map(|child| self.resolve(*child, id).cloned())
            .collect()
    }

    async fn get_descendants(
        &self,
        id: FolderId,
        include_self: bool,
        transitive: bool,
    ) -> AppResult<Vec<Folder>> {
        let mut out = Vec::new();
        if include_self && !id.is_root() {
            match self.inner.folders.get(&id) {
                Some(folder) => out.push(folder.clone()),
                None => return Ok(out),
            }
        }
        out.extend(self.collect_descendants(id, transitive)?);
        Ok(out)
    }

    async fn count_direct_children(&self, id: FolderId) -> AppResult<u64> {
        Ok(self.child_ids(id).len() as u64)
    }

    async fn count_items(&self, id: FolderId) -> AppResult<u64> {
        Ok(self.inner.items.get(&id).copied().unwrap_or(0))
    }

    async fn count_items_batch(&self, ids: &[FolderId]) -> AppResult<HashMap<FolderId, u64>> {
        Ok(ids
            .iter()
            .map(|id| (*id, self.inner.items.get(id).copied().unwrap_or(0)))
            .collect())
    }

    async fn last_change(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.inner.last_change)
    }
}

/// Every folder must hang below the root; a parent cycle would otherwise
/// drop out of every render unnoticed.
fn ensure_connected(folders: &HashMap<FolderId, Folder>, roots: &[FolderId]) -> AppResult<()> {
    let mut seen: HashSet<FolderId> = HashSet::with_capacity(folders.len());
    let mut stack: Vec<FolderId> = roots.to_vec();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(folder) = folders.get(&id) {
            stack.extend(folder.children.iter().copied());
        }
    }

    match folders.keys().filter(|id| !seen.contains(id)).min() {
        Some(orphan) => Err(AppError::invalid_hierarchy(format!(
            "Folder {orphan} is not reachable from the root"
        ))),
        None => Ok(()),
    }
}
