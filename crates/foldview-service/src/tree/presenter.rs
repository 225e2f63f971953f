//! Turns a classified folder into display attributes.

use std::borrow::Cow;
use std::fmt;

use foldview_auth::{AccessContext, ReadOnlyReason, Verdict};
use foldview_core::types::FolderId;
use foldview_entity::folder::{AccessLevel, Folder, FolderClass, NodeMarker, PresentedNode};

use super::index::NodeStats;

/// Localized strings used in tooltips.
pub trait Messages: Send + Sync + fmt::Debug + 'static {
    /// Tooltip for placeholders the user cannot open.
    fn no_access(&self) -> &str;

    /// Tooltip for view-only folders.
    fn read_only(&self) -> &str;
}

/// English tooltips.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl Messages for DefaultMessages {
    fn no_access(&self) -> &str {
        "No access"
    }

    fn read_only(&self) -> &str {
        "Read-only access"
    }
}

/// Reverse HTML special-character escaping in a stored title.
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    const ENTITIES: [(&str, char); 6] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#039;", '\''),
        ("&#39;", '\''),
    ];

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Builds [`PresentedNode`]s for one access context.
#[derive(Debug, Clone, Copy)]
pub struct NodePresenter<'a> {
    ctx: &'a AccessContext,
    messages: &'a dyn Messages,
}

impl<'a> NodePresenter<'a> {
    /// Create a presenter.
    pub fn new(ctx: &'a AccessContext, messages: &'a dyn Messages) -> Self {
        Self { ctx, messages }
    }

    /// Present a folder under `parent_id`; `None` for hidden folders.
    pub fn present(
        &self,
        folder: &Folder,
        verdict: Verdict,
        stats: &NodeStats,
        parent_id: FolderId,
    ) -> Option<PresentedNode> {
        let ctx = self.ctx;
        let is_personal = ctx.is_personal(folder.id);
        let account_title = if ctx.is_read_only_user() && !is_personal {
            self.messages.read_only()
        } else {
            ""
        };

        let (badge, marker, title, folder_class, access) = match verdict {
            Verdict::Hidden => return None,
            Verdict::Visible => (
                self.counters(stats.items, stats),
                None,
                account_title,
                FolderClass::Folder,
                AccessLevel::Full,
            ),
            Verdict::VisibleReadOnly { reason } => {
                let (title, class) = match reason {
                    ReadOnlyReason::Folder => {
                        (self.messages.read_only(), FolderClass::NotDroppable)
                    }
                    ReadOnlyReason::Account => (account_title, FolderClass::Folder),
                };
                (
                    self.counters(stats.items, stats),
                    Some(NodeMarker::ReadOnly),
                    title,
                    class,
                    AccessLevel::ReadOnly,
                )
            }
            Verdict::VisibleLimited { granted_items } => {
                let (badge, marker) = if ctx.is_read_only_user() {
                    (String::new(), Some(NodeMarker::ReadOnly))
                } else {
                    (granted_items.to_string(), None)
                };
                (
                    badge,
                    marker,
                    account_title,
                    FolderClass::Folder,
                    AccessLevel::Limited,
                )
            }
            Verdict::BlockedVisible => (
                String::new(),
                Some(NodeMarker::NoAccess),
                self.messages.no_access(),
                FolderClass::NotDroppable,
                AccessLevel::Blocked,
            ),
        };

        let is_blocked = matches!(verdict, Verdict::BlockedVisible);
        let is_restricted = !matches!(
            verdict,
            Verdict::Visible
                | Verdict::VisibleReadOnly {
                    reason: ReadOnlyReason::Account
                }
        );

        Some(PresentedNode {
            id: folder.id,
            parent_id,
            label: self.label(folder),
            badge,
            marker,
            title: title.to_string(),
            folder_class,
            access,
            is_blocked,
            is_restricted,
            has_children: folder.has_children(),
            is_personal_folder: is_personal,
            can_edit: ctx.can_create_root_folder() && !is_blocked,
        })
    }

    /// Decoded title, with a personal folder root shown as its owner's login.
    fn label(&self, folder: &Folder) -> String {
        let ctx = self.ctx;
        if ctx.user_id().get() != 0
            && !ctx.user_login().is_empty()
            && folder.is_personal_root_of(ctx.user_id())
        {
            return ctx.user_login().to_string();
        }
        decode_entities(&folder.title).into_owned()
    }

    /// `n`, or `n/descendant items/descendant folders` with counters on.
    fn counters(&self, items: u64, stats: &NodeStats) -> String {
        if self.ctx.settings().show_tree_counters {
            format!(
                "{items}/{}/{}",
                stats.descendant_items,
                stats.descendant_folders()
            )
        } else {
            items.to_string()
        }
    }
}
