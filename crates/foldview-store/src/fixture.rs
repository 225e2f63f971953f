//! JSON fixture format for the in-memory tree store.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use foldview_core::error::{AppError, ErrorKind};
use foldview_core::result::AppResult;
use foldview_entity::folder::FolderRecord;

/// A flat list of folder rows plus the hierarchy's last-change timestamp.
///
/// ```json
/// {
///   "last_change": "2026-03-01T09:30:00Z",
///   "folders": [
///     { "id": 1, "parent_id": 0, "title": "Infra", "level": 1, "items": 4 },
///     { "id": 2, "parent_id": 1, "title": "DB", "level": 2, "items": 2 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeFixture {
    /// When the hierarchy last changed.
    #[serde(default)]
    pub last_change: Option<DateTime<Utc>>,
    /// Folder rows; siblings keep their file order.
    #[serde(default)]
    pub folders: Vec<FolderRecord>,
}

impl TreeFixture {
    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a fixture file.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Failed to read tree fixture '{}'", path.display()),
                e,
            )
        })?;
        let fixture = Self::from_json(&raw)?;
        debug!(
            path = %path.display(),
            folders = fixture.folders.len(),
            "Loaded tree fixture"
        );
        Ok(fixture)
    }
}
