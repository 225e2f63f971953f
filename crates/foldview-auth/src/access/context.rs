//! Immutable per-request access context.

use std::collections::{HashMap, HashSet};

use foldview_core::config::tree::TreeConfig;
use foldview_core::types::{FolderId, ItemId, UserId};
use foldview_entity::folder::Folder;

/// Installation switches the classifier and presenter consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplaySettings {
    /// Hide unreachable folders instead of blocking them.
    pub show_only_accessible_folders: bool,
    /// Append descendant counters to badges.
    pub show_tree_counters: bool,
    /// Personal folders are enabled in this installation.
    pub enable_personal_folders: bool,
}

impl From<&TreeConfig> for DisplaySettings {
    fn from(config: &TreeConfig) -> Self {
        Self {
            show_only_accessible_folders: config.show_only_accessible_folders,
            show_tree_counters: config.show_tree_counters,
            enable_personal_folders: config.enable_personal_folders,
        }
    }
}

/// One user's folder grants for the duration of a single request.
///
/// Membership in the categories is not mutually exclusive; the classifier
/// resolves overlaps. Every category is present (possibly empty) and the
/// context cannot be changed once built.
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    user_id: UserId,
    user_login: String,
    read_only_user: bool,
    can_create_root_folder: bool,
    forbidden: HashSet<FolderId>,
    visible: HashSet<FolderId>,
    limited: HashMap<FolderId, HashSet<ItemId>>,
    restricted_for_items: HashMap<FolderId, HashSet<ItemId>>,
    no_access: HashSet<FolderId>,
    read_only: HashSet<FolderId>,
    personal: HashSet<FolderId>,
    personal_visible: HashSet<FolderId>,
    settings: DisplaySettings,
}

impl AccessContext {
    /// Start building a context for one user.
    pub fn builder(user_id: UserId, user_login: impl Into<String>) -> AccessContextBuilder {
        AccessContextBuilder {
            ctx: AccessContext {
                user_id,
                user_login: user_login.into(),
                ..Default::default()
            },
        }
    }

    /// The requesting user's id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The requesting user's login.
    pub fn user_login(&self) -> &str {
        &self.user_login
    }

    /// Whether the whole account is read-only.
    pub fn is_read_only_user(&self) -> bool {
        self.read_only_user
    }

    /// Whether the user may create folders.
    pub fn can_create_root_folder(&self) -> bool {
        self.can_create_root_folder
    }

    /// Display switches in effect.
    pub fn settings(&self) -> DisplaySettings {
        self.settings
    }

    /// Folder is blanket-forbidden.
    pub fn is_forbidden(&self, id: FolderId) -> bool {
        self.forbidden.contains(&id)
    }

    /// Folder is visible through group membership.
    pub fn is_visible(&self, id: FolderId) -> bool {
        self.visible.contains(&id)
    }

    /// Items the user may see in a limited folder.
    pub fn limited_items(&self, id: FolderId) -> Option<&HashSet<ItemId>> {
        self.limited.get(&id)
    }

    /// Items visible in a folder that is otherwise restricted.
    pub fn restricted_items(&self, id: FolderId) -> Option<&HashSet<ItemId>> {
        self.restricted_for_items.get(&id)
    }

    /// Folder is explicitly marked no-access.
    pub fn is_no_access(&self, id: FolderId) -> bool {
        self.no_access.contains(&id)
    }

    /// Folder is view-only for this user.
    pub fn is_read_only_folder(&self, id: FolderId) -> bool {
        self.read_only.contains(&id)
    }

    /// Folder is one of the user's own personal folders.
    pub fn is_personal(&self, id: FolderId) -> bool {
        self.personal.contains(&id)
    }

    /// Folder is a personal folder shared into the user's visible set.
    pub fn is_personal_visible(&self, id: FolderId) -> bool {
        self.personal_visible.contains(&id)
    }

    /// Folder is granted through the visible, limited, or restricted-for-items channels.
    pub fn has_positive_grant(&self, id: FolderId) -> bool {
        self.visible.contains(&id)
            || self.limited.contains_key(&id)
            || self.restricted_for_items.contains_key(&id)
    }

    /// Folder holds a personal folder or positive grant for this user.
    pub fn grants_access(&self, id: FolderId) -> bool {
        self.personal.contains(&id) || self.has_positive_grant(id)
    }

    /// Another user's personal folder while personal folders are enabled.
    ///
    /// Such folders are hidden whatever grants name them.
    pub fn is_foreign_personal(&self, folder: &Folder) -> bool {
        self.settings.enable_personal_folders
            && folder.personal_folder
            && !self.is_personal(folder.id)
    }

    /// Folder the user can actually open: granted and not foreign personal.
    pub fn reaches(&self, folder: &Folder) -> bool {
        !self.is_foreign_personal(folder) && self.grants_access(folder.id)
    }

    /// Folder holds a positive grant that survives the personal-folder check.
    pub fn reaches_by_grant(&self, folder: &Folder) -> bool {
        !self.is_foreign_personal(folder) && self.has_positive_grant(folder.id)
    }

    /// Folder contributes its items to ancestors' descendant-item counters.
    pub fn counts_items(&self, id: FolderId) -> bool {
        self.visible.contains(&id) || self.restricted_for_items.contains_key(&id)
    }
}

/// Builder for [`AccessContext`].
#[derive(Debug, Clone)]
pub struct AccessContextBuilder {
    ctx: AccessContext,
}

impl AccessContextBuilder {
    /// Mark the whole account read-only.
    pub fn read_only_user(mut self, read_only: bool) -> Self {
        self.ctx.read_only_user = read_only;
        self
    }

    /// Allow the user to create folders.
    pub fn can_create_root_folder(mut self, allowed: bool) -> Self {
        self.ctx.can_create_root_folder = allowed;
        self
    }

    /// Set display switches.
    pub fn settings(mut self, settings: DisplaySettings) -> Self {
        self.ctx.settings = settings;
        self
    }

    /// Add blanket-forbidden folders.
    pub fn forbidden(mut self, ids: impl IntoIterator<Item = FolderId>) -> Self {
        self.ctx.forbidden.extend(ids);
        self
    }

    /// Add folders visible through group membership.
    pub fn visible(mut self, ids: impl IntoIterator<Item = FolderId>) -> Self {
        self.ctx.visible.extend(ids);
        self
    }

    /// Grant a subset of items in an otherwise inaccessible folder.
    pub fn limited(mut self, folder: FolderId, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.ctx.limited.entry(folder).or_default().extend(items);
        self
    }

    /// Grant items in a restricted folder.
    pub fn restricted_for_items(
        mut self,
        folder: FolderId,
        items: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        self.ctx
            .restricted_for_items
            .entry(folder)
            .or_default()
            .extend(items);
        self
    }

    /// Add explicit no-access folders.
    pub fn no_access(mut self, ids: impl IntoIterator<Item = FolderId>) -> Self {
        self.ctx.no_access.extend(ids);
        self
    }

    /// Add view-only folders.
    pub fn read_only_folders(mut self, ids: impl IntoIterator<Item = FolderId>) -> Self {
        self.ctx.read_only.extend(ids);
        self
    }

    /// Add the user's own personal folders.
    pub fn personal(mut self, ids: impl IntoIterator<Item = FolderId>) -> Self {
        self.ctx.personal.extend(ids);
        self
    }

    /// Add personal folders shared into the user's visible set.
    pub fn personal_visible(mut self, ids: impl IntoIterator<Item = FolderId>) -> Self {
        self.ctx.personal_visible.extend(ids);
        self
    }

    /// Freeze the context.
    pub fn build(self) -> AccessContext {
        self.ctx
    }
}
