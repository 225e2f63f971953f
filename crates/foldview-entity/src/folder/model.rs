//! Folder entity model.

use serde::{Deserialize, Serialize};

use foldview_core::types::{FolderId, UserId};

/// A folder in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Parent folder ID ([`FolderId::ROOT`] for top-level folders).
    pub parent_id: FolderId,
    /// Stored title, possibly HTML-escaped.
    pub title: String,
    /// Depth in the folder tree (1 for top-level folders).
    pub level: u32,
    /// Child folder IDs in display order.
    #[serde(default)]
    pub children: Vec<FolderId>,
    /// Whether the folder was created as some user's personal folder.
    #[serde(default)]
    pub personal_folder: bool,
}

impl Folder {
    /// Check if this folder is the personal folder root of `user_id`.
    ///
    /// Personal folder roots sit at level 1 and are titled with the owner's id.
    pub fn is_personal_root_of(&self, user_id: UserId) -> bool {
        self.level == 1 && self.title.trim() == user_id.to_string()
    }

    /// Check whether the folder has any child folders.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Flat folder row as stored in a fixture file.
///
/// Children are not listed; they are derived from `parent_id` in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderRecord {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Parent folder ID (`0` for top-level folders).
    #[serde(default)]
    pub parent_id: FolderId,
    /// Stored title.
    pub title: String,
    /// Depth in the folder tree.
    pub level: u32,
    /// Personal folder flag.
    #[serde(default)]
    pub personal_folder: bool,
    /// Number of active items filed directly under this folder.
    #[serde(default)]
    pub items: u64,
}

impl FolderRecord {
    /// Convert into a [`Folder`] with no children attached yet.
    pub fn to_folder(&self) -> Folder {
        Folder {
            id: self.id,
            parent_id: self.parent_id,
            title: self.title.clone(),
            level: self.level,
            children: Vec::new(),
            personal_folder: self.personal_folder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(title: &str, level: u32) -> Folder {
        Folder {
            id: FolderId(3),
            parent_id: FolderId::ROOT,
            title: title.to_string(),
            level,
            children: Vec::new(),
            personal_folder: true,
        }
    }

    #[test]
    fn test_personal_root_requires_level_one() {
        assert!(folder("17", 1).is_personal_root_of(UserId(17)));
        assert!(!folder("17", 2).is_personal_root_of(UserId(17)));
        assert!(!folder("18", 1).is_personal_root_of(UserId(17)));
    }

    #[test]
    fn test_record_defaults() {
        let record: FolderRecord =
            serde_json::from_str(r#"{"id": 4, "title": "Ops", "level": 1}"#).unwrap();
        assert_eq!(record.parent_id, FolderId::ROOT);
        assert_eq!(record.items, 0);
        assert!(record.to_folder().parent_id.is_root());
    }
}
