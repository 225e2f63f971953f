//! Output unit of a tree render.

use serde::{Deserialize, Serialize};

use foldview_core::types::FolderId;

/// Style class attached to a presented folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderClass {
    /// Ordinary folder; items may be dropped into it.
    Folder,
    /// Items may not be dropped into this folder.
    NotDroppable,
}

/// Glyph shown in front of a folder label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeMarker {
    /// Eye glyph: the folder can be viewed but not modified.
    ReadOnly,
    /// Cross glyph: the folder exists but cannot be opened.
    NoAccess,
}

/// How much of a presented folder the user can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Full access.
    Full,
    /// View-only access.
    ReadOnly,
    /// Only some items of the folder are visible.
    Limited,
    /// Placeholder without access.
    Blocked,
}

/// A folder as emitted to the UI after filtering and decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedNode {
    /// Folder ID.
    pub id: FolderId,
    /// Nearest emitted ancestor ([`FolderId::ROOT`] for top-level entries).
    pub parent_id: FolderId,
    /// Decoded display label.
    pub label: String,
    /// Item count badge (empty when no badge is shown).
    pub badge: String,
    /// Optional glyph in front of the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<NodeMarker>,
    /// Tooltip text.
    pub title: String,
    /// Style class.
    pub folder_class: FolderClass,
    /// Access level the classifier granted.
    pub access: AccessLevel,
    /// Shown as a placeholder only.
    pub is_blocked: bool,
    /// Access is narrower than full.
    pub is_restricted: bool,
    /// The folder has child folders (whether or not they are visible).
    pub has_children: bool,
    /// The folder is one of the user's personal folders.
    pub is_personal_folder: bool,
    /// The user may create folders here.
    pub can_edit: bool,
}

impl PresentedNode {
    /// Label with the badge appended, as a plain string.
    pub fn display_text(&self) -> String {
        if self.badge.is_empty() {
            self.label.clone()
        } else {
            format!("{} ({})", self.label, self.badge)
        }
    }
}
