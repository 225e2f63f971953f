//! Integration tests for one-level (lazy) expansion over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_lazy_root_lists_top_level() {
    let app = helpers::TestApp::new();
    let response = app
        .render(helpers::alice(), json!({"strategy": "lazy"}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["meta"]["strategy"], "lazy");
    assert_eq!(response.body["meta"]["node_id"], 0);
    assert_eq!(response.pairs(), vec![(1, 0), (5, 0), (9, 0), (20, 0)]);
}

#[tokio::test]
async fn test_lazy_node_matches_eager_attributes() {
    let app = helpers::TestApp::new();
    let eager = app
        .render(helpers::alice(), json!({"strategy": "eager"}))
        .await;
    let lazy = app
        .render(helpers::alice(), json!({"strategy": "lazy", "node_id": 1}))
        .await;

    assert_eq!(lazy.pairs(), vec![(2, 1), (4, 1)]);
    for node in lazy.nodes() {
        let id = node["id"].as_u64().unwrap();
        assert_eq!(node, eager.node(id));
    }
}

#[tokio::test]
async fn test_sequential_alias() {
    let app = helpers::TestApp::new();
    let response = app
        .render(helpers::alice(), json!({"strategy": "sequential", "node_id": 20}))
        .await;
    assert_eq!(response.body["meta"]["strategy"], "lazy");
    assert_eq!(response.pairs(), vec![(21, 20)]);
}

#[tokio::test]
async fn test_hidden_node_expands_to_nothing() {
    let app = helpers::TestApp::new();
    let response = app
        .render(helpers::alice(), json!({"strategy": "lazy", "node_id": 30}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.nodes().is_empty());
}

#[tokio::test]
async fn test_unknown_node_is_not_found() {
    let app = helpers::TestApp::new();
    let response = app
        .render(helpers::alice(), json!({"strategy": "lazy", "node_id": 404}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}
