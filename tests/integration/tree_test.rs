//! Integration tests for full (eager) tree renders over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use foldview_core::config::AppConfig;

#[tokio::test]
async fn test_eager_render_classifies_every_folder() {
    let app = helpers::TestApp::new();
    let response = app.render(helpers::alice(), json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["meta"]["strategy"], "eager");
    assert_eq!(response.body["meta"]["cached"], false);
    assert_eq!(
        response.pairs(),
        vec![
            (1, 0),
            (2, 1),
            (3, 2),
            (4, 1),
            (5, 0),
            (9, 0),
            (10, 9),
            (20, 0),
            (21, 20)
        ]
    );

    let infra = response.node(1);
    assert_eq!(infra["access"], "full");
    assert_eq!(infra["badge"], "3");
    assert_eq!(infra["has_children"], true);

    let db = response.node(2);
    assert_eq!(db["access"], "blocked");
    assert_eq!(db["is_blocked"], true);
    assert_eq!(db["marker"], "no_access");
    assert_eq!(db["title"], "No access");
    assert_eq!(db["badge"], "");

    let web = response.node(4);
    assert_eq!(web["label"], "Web & Edge");
    assert_eq!(web["access"], "limited");
    assert_eq!(web["badge"], "2");

    let finance = response.node(5);
    assert_eq!(finance["access"], "read_only");
    assert_eq!(finance["marker"], "read_only");
    assert_eq!(finance["folder_class"], "not_droppable");
    assert_eq!(finance["title"], "Read-only access");

    assert_eq!(response.node(9)["access"], "blocked");
}

#[tokio::test]
async fn test_personal_root_shows_login() {
    let app = helpers::TestApp::new();
    let response = app.render(helpers::alice(), json!({})).await;

    let own = response.node(20);
    assert_eq!(own["label"], "alice");
    assert_eq!(own["is_personal_folder"], true);
    assert_eq!(response.node(21)["label"], "Banking");
    assert!(response.nodes().iter().all(|n| n["id"] != 30));
}

#[tokio::test]
async fn test_forbidden_folder_reparents_children() {
    let app = helpers::TestApp::new();
    let mut access = helpers::alice();
    access["forbidden_folders"] = json!([2]);

    let response = app.render(access, json!({})).await;
    let pairs = response.pairs();
    assert!(!pairs.iter().any(|(id, _)| *id == 2));
    assert!(pairs.contains(&(3, 1)));
    assert!(pairs.contains(&(4, 1)));
}

#[tokio::test]
async fn test_only_accessible_folders() {
    let mut config = AppConfig::default();
    config.tree.show_only_accessible_folders = true;
    let app = helpers::TestApp::with_config(config);

    let response = app.render(helpers::alice(), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    // DB stays as scaffolding for Replicas; Old has nothing reachable.
    assert_eq!(
        response.pairs(),
        vec![(1, 0), (2, 1), (3, 2), (4, 1), (5, 0), (9, 0), (20, 0), (21, 20)]
    );
    assert_eq!(response.node(2)["access"], "blocked");
}

#[tokio::test]
async fn test_tree_counters() {
    let mut config = AppConfig::default();
    config.tree.show_tree_counters = true;
    let app = helpers::TestApp::with_config(config);

    let response = app.render(helpers::alice(), json!({})).await;
    assert_eq!(response.node(5)["badge"], "2/2/0");
    // Own items plus Replicas; DB and Web hold no countable grant.
    assert_eq!(response.node(1)["badge"], "3/5/3");
}

#[tokio::test]
async fn test_read_only_account() {
    let app = helpers::TestApp::new();
    let mut access = helpers::alice();
    access["user_read_only"] = json!(1);

    let response = app.render(access, json!({})).await;
    let infra = response.node(1);
    assert_eq!(infra["access"], "read_only");
    assert_eq!(infra["title"], "Read-only access");

    let web = response.node(4);
    assert_eq!(web["access"], "limited");
    assert_eq!(web["marker"], "read_only");
    assert_eq!(web["badge"], "");

    assert_eq!(response.node(20)["access"], "full");
}

#[tokio::test]
async fn test_legacy_field_names_and_loose_values() {
    let app = helpers::TestApp::new();
    let access = json!({
        "id": "7",
        "login": "alice",
        "groupes_visibles": ["1", 3, "x", null],
        "list_folders_limited": null,
        "forbiden_pfs": [],
        "personal_folders": [20]
    });

    let response = app.render(access, json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.node(1)["access"], "full");
    assert_eq!(response.node(3)["access"], "full");
    assert_eq!(response.node(20)["label"], "alice");
}

#[tokio::test]
async fn test_second_render_served_from_cache() {
    let app = helpers::TestApp::new();
    let first = app.render(helpers::alice(), json!({})).await;
    let second = app.render(helpers::alice(), json!({})).await;

    assert_eq!(second.body["meta"]["cached"], true);
    assert_eq!(first.body["data"], second.body["data"]);

    let forced = app
        .render(helpers::alice(), json!({"force_refresh": true}))
        .await;
    assert_eq!(forced.body["meta"]["cached"], false);
}

#[tokio::test]
async fn test_invalidate_user_cache() {
    let app = helpers::TestApp::new();
    app.render(helpers::alice(), json!({})).await;

    let response = app.request("DELETE", "/api/tree/cache/7", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["removed"], 1);

    let again = app.render(helpers::alice(), json!({})).await;
    assert_eq!(again.body["meta"]["cached"], false);

    let all = app.request("DELETE", "/api/tree/cache", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["success"], true);
    let after_flush = app.render(helpers::alice(), json!({})).await;
    assert_eq!(after_flush.body["meta"]["cached"], false);
}

#[tokio::test]
async fn test_unknown_strategy_rejected() {
    let app = helpers::TestApp::new();
    let response = app
        .render(helpers::alice(), json!({"strategy": "breadth"}))
        .await;
    assert!(response.status.is_client_error());
}
