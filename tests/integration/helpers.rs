//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use foldview_api::AppState;
use foldview_cache::CacheManager;
use foldview_core::config::AppConfig;
use foldview_service::TreeService;
use foldview_store::{MemoryTreeStore, TreeFixture};

/// Hierarchy shared by the integration suites.
///
/// ```text
/// 1 Infra ── 2 DB ── 3 Replicas
///         └─ 4 Web
/// 5 Finance
/// 9 Archive ── 10 Old
/// 20 "7" (personal) ── 21 Banking
/// 30 "9" (personal)
/// ```
pub const FIXTURE: &str = r#"{
    "last_change": "2026-09-30T08:15:00Z",
    "folders": [
        {"id": 1, "parent_id": 0, "title": "Infra", "level": 1, "items": 3},
        {"id": 2, "parent_id": 1, "title": "DB", "level": 2, "items": 4},
        {"id": 3, "parent_id": 2, "title": "Replicas", "level": 3, "items": 2},
        {"id": 4, "parent_id": 1, "title": "Web &amp; Edge", "level": 2, "items": 1},
        {"id": 5, "parent_id": 0, "title": "Finance", "level": 1, "items": 2},
        {"id": 9, "parent_id": 0, "title": "Archive", "level": 1},
        {"id": 10, "parent_id": 9, "title": "Old", "level": 2, "items": 5},
        {"id": 20, "parent_id": 0, "title": "7", "level": 1, "personal_folder": true, "items": 1},
        {"id": 21, "parent_id": 20, "title": "Banking", "level": 2, "personal_folder": true, "items": 2},
        {"id": 30, "parent_id": 0, "title": "9", "level": 1, "personal_folder": true}
    ]
}"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state, for poking services directly
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with default settings
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let fixture = TreeFixture::from_json(FIXTURE).expect("Failed to parse fixture");
        let store = MemoryTreeStore::from_fixture(fixture).expect("Failed to build store");
        let cache = Arc::new(CacheManager::new(&config.cache).expect("Failed to init cache"));
        let tree_service = Arc::new(TreeService::new(Arc::new(store), config.tree.clone()));

        let state = AppState::new(config, tree_service, cache);
        let router = foldview_api::build_app(state.clone());

        Self { router, state }
    }

    /// Render a tree for `access` with extra request fields merged in
    pub async fn render(&self, access: Value, extra: Value) -> TestResponse {
        let mut body = serde_json::json!({ "access": access });
        if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
            target.extend(fields);
        }
        self.request("POST", "/api/tree", Some(body)).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Access context for user 7 ("alice").
pub fn alice() -> Value {
    serde_json::json!({
        "user_id": 7,
        "user_login": "alice",
        "visible_folders": [1, 3, 5],
        "read_only_folders": [5],
        "limited_folders": {"4": [41, 42]},
        "no_access_folders": [9],
        "personal_folders": [20, 21]
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Rendered nodes of a tree response
    pub fn nodes(&self) -> &Vec<Value> {
        self.body["data"].as_array().expect("Response has no data array")
    }

    /// `(id, parent_id)` of every rendered node, in order
    pub fn pairs(&self) -> Vec<(u64, u64)> {
        self.nodes()
            .iter()
            .map(|n| {
                (
                    n["id"].as_u64().expect("id"),
                    n["parent_id"].as_u64().expect("parent_id"),
                )
            })
            .collect()
    }

    /// The rendered node with the given id
    pub fn node(&self, id: u64) -> &Value {
        self.nodes()
            .iter()
            .find(|n| n["id"].as_u64() == Some(id))
            .unwrap_or_else(|| panic!("Folder {id} not rendered"))
    }
}
