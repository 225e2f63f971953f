//! Tree store configuration.

use serde::{Deserialize, Serialize};

/// Where the in-memory tree store loads its snapshot from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON folder fixture.
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fixture_path: default_fixture_path(),
        }
    }
}

fn default_fixture_path() -> String {
    "data/tree.json".to_string()
}
