//! Loosely typed session payload and its coercion into an [`AccessContext`].
//!
//! Session stores hand ids over as numbers, numeric strings, or garbage.
//! Everything is parsed leniently: a value that cannot be read as a positive
//! id is dropped with a warning, which can only narrow access.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use foldview_core::types::{FolderId, ItemId, UserId};

use super::context::{AccessContext, DisplaySettings};

/// A single id as found in session data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// A JSON number.
    Number(i64),
    /// A JSON string, hopefully numeric.
    Text(String),
    /// Anything else; always dropped.
    Other(serde_json::Value),
}

impl RawId {
    /// Parse as a strictly positive integer.
    pub fn to_positive(&self) -> Option<u64> {
        match self {
            Self::Number(n) if *n > 0 => Some(*n as u64),
            Self::Text(s) => s.trim().parse::<u64>().ok().filter(|n| *n > 0),
            _ => None,
        }
    }
}

impl From<u64> for RawId {
    fn from(value: u64) -> Self {
        Self::Number(value as i64)
    }
}

/// A boolean-ish session flag (`true`, `1`, `"1"`, `"true"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    /// JSON boolean.
    Bool(bool),
    /// JSON number; non-zero is true.
    Number(i64),
    /// JSON string.
    Text(String),
}

impl RawFlag {
    /// Interpret the flag.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0,
            Self::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
        }
    }
}

/// Folder-to-items grant map.
///
/// Sessions serialize an empty map as `[]` and a densely keyed map as a
/// list, so both shapes are accepted. List positions are the folder ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGrantMap {
    /// `{ "12": [1, 2] }`
    Map(HashMap<String, Option<Vec<RawId>>>),
    /// `[[1, 2], [3]]`
    List(Vec<Option<Vec<RawId>>>),
}

impl Default for RawGrantMap {
    fn default() -> Self {
        Self::Map(HashMap::new())
    }
}

/// Access data as it arrives from the session gateway.
///
/// Field names match the gateway's; the older session key names are
/// accepted as aliases. `null` is read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAccessContext {
    /// Requesting user.
    #[serde(default, alias = "id")]
    pub user_id: Option<RawId>,
    /// Requesting user's login.
    #[serde(default, alias = "login", deserialize_with = "null_as_default")]
    pub user_login: String,
    /// Whole account is read-only.
    #[serde(default, alias = "user_read_only_flag")]
    pub user_read_only: Option<RawFlag>,
    /// Blanket-forbidden folders.
    #[serde(default, alias = "forbiden_pfs", deserialize_with = "null_as_default")]
    pub forbidden_folders: Vec<RawId>,
    /// Folders visible through group membership.
    #[serde(default, alias = "groupes_visibles", deserialize_with = "null_as_default")]
    pub visible_folders: Vec<RawId>,
    /// Folder to visible items, for otherwise inaccessible folders.
    #[serde(default, alias = "list_folders_limited", deserialize_with = "null_as_default")]
    pub limited_folders: RawGrantMap,
    /// Folder to visible items, for restricted folders.
    #[serde(
        default,
        alias = "list_restricted_folders_for_items",
        deserialize_with = "null_as_default"
    )]
    pub restricted_folders_for_items: RawGrantMap,
    /// Explicit no-access folders.
    #[serde(default, deserialize_with = "null_as_default")]
    pub no_access_folders: Vec<RawId>,
    /// View-only folders.
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_only_folders: Vec<RawId>,
    /// The user's own personal folders.
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal_folders: Vec<RawId>,
    /// Personal folders shared into the user's visible set.
    #[serde(
        default,
        alias = "personal_visible_groups",
        deserialize_with = "null_as_default"
    )]
    pub personal_visible_folders: Vec<RawId>,
    /// The user may create folders.
    #[serde(default)]
    pub can_create_root_folder: Option<RawFlag>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawAccessContext {
    /// Coerce into an immutable [`AccessContext`].
    ///
    /// Never fails. A missing or malformed user id becomes user 0, which
    /// owns no personal folder.
    pub fn into_context(self, settings: DisplaySettings) -> AccessContext {
        let user_id = match &self.user_id {
            Some(raw) => raw.to_positive().map(UserId).unwrap_or_else(|| {
                warn!(value = ?raw, "Dropping malformed user id");
                UserId::default()
            }),
            None => UserId::default(),
        };

        let mut builder = AccessContext::builder(user_id, self.user_login.trim())
            .settings(settings)
            .read_only_user(self.user_read_only.as_ref().is_some_and(RawFlag::is_set))
            .can_create_root_folder(
                self.can_create_root_folder
                    .as_ref()
                    .is_some_and(RawFlag::is_set),
            )
            .forbidden(folder_ids("forbidden_folders", &self.forbidden_folders))
            .visible(folder_ids("visible_folders", &self.visible_folders))
            .no_access(folder_ids("no_access_folders", &self.no_access_folders))
            .read_only_folders(folder_ids("read_only_folders", &self.read_only_folders))
            .personal(folder_ids("personal_folders", &self.personal_folders))
            .personal_visible(folder_ids(
                "personal_visible_folders",
                &self.personal_visible_folders,
            ));

        for (folder, items) in grant_entries("limited_folders", &self.limited_folders) {
            builder = builder.limited(folder, items);
        }
        for (folder, items) in grant_entries(
            "restricted_folders_for_items",
            &self.restricted_folders_for_items,
        ) {
            builder = builder.restricted_for_items(folder, items);
        }

        builder.build()
    }
}

fn folder_ids(field: &'static str, raw: &[RawId]) -> Vec<FolderId> {
    raw.iter()
        .filter_map(|value| match value.to_positive() {
            Some(id) => Some(FolderId(id)),
            None => {
                warn!(field, value = ?value, "Dropping malformed folder id");
                None
            }
        })
        .collect()
}

fn item_ids(field: &'static str, raw: Option<&Vec<RawId>>) -> Vec<ItemId> {
    raw.map(|values| {
        values
            .iter()
            .filter_map(|value| match value.to_positive() {
                Some(id) => Some(ItemId(id)),
                None => {
                    warn!(field, value = ?value, "Dropping malformed item id");
                    None
                }
            })
            .collect()
    })
    .unwrap_or_default()
}

fn grant_entries(field: &'static str, raw: &RawGrantMap) -> Vec<(FolderId, Vec<ItemId>)> {
    match raw {
        RawGrantMap::Map(map) => map
            .iter()
            .filter_map(|(key, items)| match key.trim().parse::<u64>() {
                Ok(id) if id > 0 => Some((FolderId(id), item_ids(field, items.as_ref()))),
                _ => {
                    warn!(field, key = %key, "Dropping malformed folder key");
                    None
                }
            })
            .collect(),
        RawGrantMap::List(list) => list
            .iter()
            .enumerate()
            .filter(|(index, _)| *index > 0)
            .map(|(index, items)| (FolderId(index as u64), item_ids(field, items.as_ref())))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce(json: &str) -> AccessContext {
        let raw: RawAccessContext = serde_json::from_str(json).unwrap();
        raw.into_context(DisplaySettings::default())
    }

    #[test]
    fn test_mixed_id_representations() {
        let ctx = coerce(
            r#"{
                "user_id": "7",
                "user_login": " alice ",
                "visible_folders": [1, "2", " 3 ", "x", -4, 0, null, {"id": 5}],
                "limited_folders": {"10": ["100", 101], "bad": [1]},
                "user_read_only": "1"
            }"#,
        );
        assert_eq!(ctx.user_id(), UserId(7));
        assert_eq!(ctx.user_login(), "alice");
        assert!(ctx.is_read_only_user());
        for id in [1, 2, 3] {
            assert!(ctx.is_visible(FolderId(id)));
        }
        assert!(!ctx.is_visible(FolderId(4)));
        assert!(!ctx.is_visible(FolderId(5)));
        assert_eq!(ctx.limited_items(FolderId(10)).map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_absent_and_null_fields_are_empty() {
        let ctx = coerce(r#"{"user_id": 3, "visible_folders": null, "limited_folders": []}"#);
        assert_eq!(ctx.user_id(), UserId(3));
        assert!(!ctx.is_visible(FolderId(1)));
        assert!(!ctx.is_read_only_user());
        assert!(!ctx.can_create_root_folder());
    }

    #[test]
    fn test_session_aliases() {
        let ctx = coerce(
            r#"{
                "id": 4,
                "login": "bob",
                "groupes_visibles": [8],
                "forbiden_pfs": [9],
                "list_restricted_folders_for_items": {"11": [1, 2, 3]},
                "personal_visible_groups": [12]
            }"#,
        );
        assert_eq!(ctx.user_id(), UserId(4));
        assert!(ctx.is_visible(FolderId(8)));
        assert!(ctx.is_forbidden(FolderId(9)));
        assert_eq!(ctx.restricted_items(FolderId(11)).map(|s| s.len()), Some(3));
        assert!(ctx.is_personal_visible(FolderId(12)));
    }

    #[test]
    fn test_list_shaped_grant_map_uses_positions() {
        let ctx = coerce(r#"{"limited_folders": [[1], null, [2, 3]]}"#);
        assert!(ctx.limited_items(FolderId(0)).is_none());
        assert_eq!(ctx.limited_items(FolderId(1)).map(|s| s.len()), Some(0));
        assert_eq!(ctx.limited_items(FolderId(2)).map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_malformed_user_id_owns_nothing() {
        let ctx = coerce(r#"{"user_id": "nobody"}"#);
        assert_eq!(ctx.user_id(), UserId::default());
    }
}
