//! Tree rendering configuration.

use serde::{Deserialize, Serialize};

use crate::types::RenderStrategy;

/// Installation-wide switches that shape how a folder tree is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Hide folders the user cannot reach instead of showing them blocked.
    #[serde(default)]
    pub show_only_accessible_folders: bool,
    /// Append `items/descendant items/descendant folders` counters to badges.
    #[serde(default)]
    pub show_tree_counters: bool,
    /// Whether personal folders exist in this installation.
    #[serde(default = "default_true")]
    pub enable_personal_folders: bool,
    /// Strategy used when a request does not name one.
    #[serde(default)]
    pub default_strategy: RenderStrategy,
    /// Deepest hierarchy accepted before a render fails as invalid.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Bumped whenever these switches change; part of every cached tree key.
    #[serde(default = "default_config_version")]
    pub config_version: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            show_only_accessible_folders: false,
            show_tree_counters: false,
            enable_personal_folders: true,
            default_strategy: RenderStrategy::default(),
            max_depth: default_max_depth(),
            config_version: default_config_version(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    512
}

fn default_config_version() -> u32 {
    1
}
