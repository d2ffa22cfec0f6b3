//! Edit buffer API integration tests

use axum::http::StatusCode;
use coedit::shared::UserIdentity;
use serde_json::{json, Value};

use crate::common::{login, test_app, TestApp};

async fn app_with_open_file() -> (TestApp, String) {
    let app = test_app();
    app.storage.insert(&UserIdentity::new("alice"), "proj/a.js", "").unwrap();
    let alice = login(&app.server, "alice").await;
    app.server.get("/file/at/proj/a.js").authorization_bearer(&alice).await.assert_status_ok();
    (app, alice)
}

#[tokio::test]
async fn test_recent_edits() {
    let (app, alice) = app_with_open_file().await;
    app.server
        .put("/edit/at/proj/a.js")
        .json(&json!(["a", "b", "c"]))
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    let recent: Vec<Value> = app.server.get("/edit/recent/1/proj/a.js").authorization_bearer(&alice).await.json();
    assert_eq!(recent, vec![json!("b"), json!("c")]);

    let recent: Vec<Value> = app.server.get("/edit/recent/3/proj/a.js").authorization_bearer(&alice).await.json();
    assert!(recent.is_empty());

    for bad in ["4", "x"] {
        let response = app
            .server
            .get(&format!("/edit/recent/{}/proj/a.js", bad))
            .authorization_bearer(&alice)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "index {}", bad);
    }
}

#[tokio::test]
async fn test_append_needs_write_session() {
    let app = test_app();
    app.storage.insert(&UserIdentity::new("alice"), "a.js", "").unwrap();
    let alice = login(&app.server, "alice").await;
    let bob = login(&app.server, "bob").await;

    let response = app
        .server
        .put("/edit/at/a.js")
        .json(&json!({"op": 1}))
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    app.server
        .get("/file/at/~alice/a.js")
        .add_query_param("mode", "r")
        .authorization_bearer(&bob)
        .await
        .assert_status_ok();
    let response = app
        .server
        .put("/edit/at/~alice/a.js")
        .json(&json!({"op": 1}))
        .authorization_bearer(&bob)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let edits: Vec<Value> = app.server.get("/edit/list/~alice/a.js").authorization_bearer(&bob).await.json();
    assert!(edits.is_empty());
}

#[tokio::test]
async fn test_malformed_edit_body() {
    let (app, alice) = app_with_open_file().await;
    let response = app
        .server
        .put("/edit/at/proj/a.js")
        .text("{not json")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_edits_keeps_session() {
    let (app, alice) = app_with_open_file().await;
    app.server
        .put("/edit/at/proj/a.js")
        .json(&json!([1, 2]))
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    app.server.post("/edit/reset/proj/a.js").authorization_bearer(&alice).await.assert_status_ok();
    let edits: Vec<Value> = app.server.get("/edit/list/proj/a.js").authorization_bearer(&alice).await.json();
    assert!(edits.is_empty());

    // the session is still open for read/write
    app.server
        .put("/edit/at/proj/a.js")
        .json(&json!(3))
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();
    app.server.post("/edit/reset").authorization_bearer(&alice).await.assert_status_ok();
    let edits: Vec<Value> = app.server.get("/edit/list/proj/a.js").authorization_bearer(&alice).await.json();
    assert!(edits.is_empty());
    assert_eq!(app.state.collab.sessions_for_user(&UserIdentity::new("alice")).len(), 1);
}
