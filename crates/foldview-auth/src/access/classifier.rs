//! Visibility classifier.
//!
//! Resolution order (first match wins):
//! 1. Owner override: the user's own personal folders are always visible.
//! 2. Other users' personal folders are hidden when the feature is on.
//! 3. Blanket forbid hides a folder unless a positive grant overrides it.
//! 4. Group visibility, narrowed to read-only by folder or account.
//! 5. Limited, then restricted-for-items grants.
//! 6. Explicit no-access folders become placeholders.
//! 7. With "accessible folders only", unreachable subtrees are hidden.
//! 8. Everything else becomes a placeholder.

use serde::Serialize;
use tracing::trace;

use foldview_entity::folder::Folder;

use super::context::AccessContext;

/// Why a folder is shown read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOnlyReason {
    /// The folder is in the user's read-only set.
    Folder,
    /// The whole account is read-only.
    Account,
}

/// The classifier's decision for one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Render normally.
    Visible,
    /// Render with a restricted badge counting only granted items.
    VisibleLimited {
        /// Number of items the grant exposes.
        granted_items: usize,
    },
    /// Render with the read-only marker.
    VisibleReadOnly {
        /// Source of the restriction.
        reason: ReadOnlyReason,
    },
    /// Render as a non-interactive placeholder.
    BlockedVisible,
    /// Omit; descendants re-parent past this folder.
    Hidden,
}

impl Verdict {
    /// Whether the folder produces an output node.
    pub fn is_emitted(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Subtree facts the classifier needs beyond the folder itself.
///
/// Both counts only include folders for which
/// [`AccessContext::reaches`] holds, so another user's personal folder never
/// keeps an ancestor alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reachability {
    /// Strict descendants the user can reach.
    pub accessible_descendants: usize,
    /// Direct children reached through a visible, limited or restricted grant.
    pub granted_children: usize,
}

/// Maps folders to verdicts for one access context.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityClassifier<'a> {
    ctx: &'a AccessContext,
}

impl<'a> VisibilityClassifier<'a> {
    /// Bind a classifier to an access context.
    pub fn new(ctx: &'a AccessContext) -> Self {
        Self { ctx }
    }

    /// Classify one folder.
    pub fn classify(&self, folder: &Folder, reach: &Reachability) -> Verdict {
        let verdict = self.decide(folder, reach);
        trace!(folder_id = %folder.id, ?verdict, "Classified folder");
        verdict
    }

    fn decide(&self, folder: &Folder, reach: &Reachability) -> Verdict {
        let ctx = self.ctx;
        let id = folder.id;

        if ctx.is_personal(id) {
            return Verdict::Visible;
        }

        if ctx.is_foreign_personal(folder) {
            return Verdict::Hidden;
        }

        if ctx.is_forbidden(id) && !ctx.has_positive_grant(id) {
            return Verdict::Hidden;
        }

        if ctx.is_visible(id) {
            if ctx.is_read_only_folder(id) {
                return Verdict::VisibleReadOnly {
                    reason: ReadOnlyReason::Folder,
                };
            }
            if ctx.is_read_only_user() && !ctx.is_personal_visible(id) {
                return Verdict::VisibleReadOnly {
                    reason: ReadOnlyReason::Account,
                };
            }
            return Verdict::Visible;
        }

        if let Some(items) = ctx.limited_items(id) {
            return Verdict::VisibleLimited {
                granted_items: items.len(),
            };
        }

        if let Some(items) = ctx.restricted_items(id) {
            return Verdict::VisibleLimited {
                granted_items: items.len(),
            };
        }

        if ctx.is_no_access(id) {
            return Verdict::BlockedVisible;
        }

        if ctx.settings().show_only_accessible_folders && reach.accessible_descendants == 0 {
            return if reach.granted_children > 0 {
                Verdict::BlockedVisible
            } else {
                Verdict::Hidden
            };
        }

        Verdict::BlockedVisible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::context::DisplaySettings;
    use foldview_core::types::{FolderId, ItemId, UserId};

    fn folder(id: u64) -> Folder {
        Folder {
            id: FolderId(id),
            parent_id: FolderId::ROOT,
            title: format!("F{id}"),
            level: 1,
            children: Vec::new(),
            personal_folder: false,
        }
    }

    fn leaf() -> Reachability {
        Reachability::default()
    }

    fn only_accessible() -> DisplaySettings {
        DisplaySettings {
            show_only_accessible_folders: true,
            ..DisplaySettings::default()
        }
    }

    #[test]
    fn test_positive_grant_overrides_forbid() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .forbidden([FolderId(5)])
            .visible([FolderId(5)])
            .build();
        let verdict = VisibilityClassifier::new(&ctx).classify(&folder(5), &leaf());
        assert_eq!(verdict, Verdict::Visible);
    }

    #[test]
    fn test_forbid_without_grant_hides() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .forbidden([FolderId(5)])
            .build();
        let verdict = VisibilityClassifier::new(&ctx).classify(&folder(5), &leaf());
        assert_eq!(verdict, Verdict::Hidden);
    }

    #[test]
    fn test_personal_folder_overrides_everything() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .personal([FolderId(5)])
            .forbidden([FolderId(5)])
            .no_access([FolderId(5)])
            .read_only_user(true)
            .build();
        let verdict = VisibilityClassifier::new(&ctx).classify(&folder(5), &leaf());
        assert_eq!(verdict, Verdict::Visible);
    }

    #[test]
    fn test_other_users_personal_folder_hidden() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .settings(DisplaySettings {
                enable_personal_folders: true,
                ..DisplaySettings::default()
            })
            .visible([FolderId(6)])
            .build();
        let mut other = folder(6);
        other.personal_folder = true;
        let classifier = VisibilityClassifier::new(&ctx);
        assert_eq!(classifier.classify(&other, &leaf()), Verdict::Hidden);

        let disabled = AccessContext::builder(UserId(1), "alice")
            .visible([FolderId(6)])
            .build();
        assert_eq!(
            VisibilityClassifier::new(&disabled).classify(&other, &leaf()),
            Verdict::Visible
        );
    }

    #[test]
    fn test_read_only_variants() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .visible([FolderId(1), FolderId(2), FolderId(3)])
            .read_only_folders([FolderId(1)])
            .personal_visible([FolderId(3)])
            .read_only_user(true)
            .build();
        let classifier = VisibilityClassifier::new(&ctx);
        assert_eq!(
            classifier.classify(&folder(1), &leaf()),
            Verdict::VisibleReadOnly {
                reason: ReadOnlyReason::Folder
            }
        );
        assert_eq!(
            classifier.classify(&folder(2), &leaf()),
            Verdict::VisibleReadOnly {
                reason: ReadOnlyReason::Account
            }
        );
        assert_eq!(classifier.classify(&folder(3), &leaf()), Verdict::Visible);
    }

    #[test]
    fn test_limited_takes_precedence_over_restricted() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .limited(FolderId(4), [ItemId(1)])
            .restricted_for_items(FolderId(4), [ItemId(1), ItemId(2), ItemId(3)])
            .restricted_for_items(FolderId(5), [ItemId(7), ItemId(8)])
            .build();
        let classifier = VisibilityClassifier::new(&ctx);
        assert_eq!(
            classifier.classify(&folder(4), &leaf()),
            Verdict::VisibleLimited { granted_items: 1 }
        );
        assert_eq!(
            classifier.classify(&folder(5), &leaf()),
            Verdict::VisibleLimited { granted_items: 2 }
        );
    }

    #[test]
    fn test_unreachable_leaf_hidden_only_when_switch_on() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .settings(only_accessible())
            .build();
        assert_eq!(
            VisibilityClassifier::new(&ctx).classify(&folder(9), &leaf()),
            Verdict::Hidden
        );

        let ctx = AccessContext::builder(UserId(1), "alice").build();
        assert_eq!(
            VisibilityClassifier::new(&ctx).classify(&folder(9), &leaf()),
            Verdict::BlockedVisible
        );
    }

    #[test]
    fn test_scaffolding_for_reachable_descendant() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .settings(only_accessible())
            .visible([FolderId(2)])
            .build();
        let reach = Reachability {
            accessible_descendants: 1,
            granted_children: 1,
        };
        assert_eq!(
            VisibilityClassifier::new(&ctx).classify(&folder(1), &reach),
            Verdict::BlockedVisible
        );

        let stale_count = Reachability {
            accessible_descendants: 0,
            granted_children: 1,
        };
        assert_eq!(
            VisibilityClassifier::new(&ctx).classify(&folder(1), &stale_count),
            Verdict::BlockedVisible
        );
    }

    #[test]
    fn test_no_access_is_placeholder_even_when_unreachable() {
        let ctx = AccessContext::builder(UserId(1), "alice")
            .settings(only_accessible())
            .no_access([FolderId(9)])
            .build();
        assert_eq!(
            VisibilityClassifier::new(&ctx).classify(&folder(9), &leaf()),
            Verdict::BlockedVisible
        );
    }
}
