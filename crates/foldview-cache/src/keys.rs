//! Cache key builders for every foldview cache entry.

use foldview_core::types::{FolderId, RenderStrategy, UserId};

/// Prefix applied to all foldview cache keys.
const PREFIX: &str = "foldview";

/// Cache key for one rendered tree.
///
/// The configuration version and the hierarchy's last-change timestamp are
/// part of the key, so a change to either makes older entries unreachable.
pub fn tree_structure(
    user_id: UserId,
    config_version: u32,
    last_change_unix: i64,
    strategy: RenderStrategy,
    node_id: FolderId,
) -> String {
    format!("{PREFIX}:tree:{user_id}:v{config_version}:{last_change_unix}:{strategy}:{node_id}")
}

/// Pattern matching every cached tree of one user.
pub fn user_trees_pattern(user_id: UserId) -> String {
    format!("{PREFIX}:tree:{user_id}:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_key_layout() {
        let key = tree_structure(
            UserId(7),
            2,
            1_700_000_000,
            RenderStrategy::Lazy,
            FolderId(12),
        );
        assert_eq!(key, "foldview:tree:7:v2:1700000000:lazy:12");
    }

    #[test]
    fn test_user_pattern_does_not_cover_other_users() {
        let prefix = user_trees_pattern(UserId(1));
        let prefix = prefix.trim_end_matches('*');
        let other = tree_structure(UserId(10), 1, 0, RenderStrategy::Eager, FolderId::ROOT);
        assert!(!other.starts_with(prefix));
        let own = tree_structure(UserId(1), 1, 0, RenderStrategy::Eager, FolderId::ROOT);
        assert!(own.starts_with(prefix));
    }
}
