//! File API integration tests
//!
//! Open, save, delete, close and listing through `/file`, including the
//! two-user editing scenario.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use coedit::shared::{EditMode, UserIdentity};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{login, read_text, test_app};

#[tokio::test]
async fn test_two_user_editing_scenario() {
    let app = test_app();
    let alice_id = UserIdentity::new("alice");
    app.storage.insert(&alice_id, "a.txt", "hello").unwrap();
    let alice = login(&app.server, "alice").await;
    let bob = login(&app.server, "bob").await;

    let response = app.server.get("/file/at/a.txt").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "hello");

    let response = app.server.get("/file/at/~alice/a.txt").authorization_bearer(&bob).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = app
        .server
        .get("/file/at/~alice/a.txt")
        .add_query_param("mode", "r")
        .authorization_bearer(&bob)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .put("/edit/at/a.txt")
        .json(&json!([{"op": 1}, {"op": 2}]))
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let edits: Vec<Value> = app.server.get("/edit/list/a.txt").authorization_bearer(&alice).await.json();
    assert_eq!(edits, vec![json!({"op": 1}), json!({"op": 2})]);

    let response = app
        .server
        .put("/file/at/a.txt")
        .add_query_param("lastEdit", 1)
        .text("hello world")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(read_text(&app.storage, &alice_id, "a.txt"), "hello world");
    let since: Vec<Value> = app.server.get("/edit/sincesave/a.txt").authorization_bearer(&alice).await.json();
    assert!(since.is_empty());

    app.server
        .put("/edit/at/a.txt")
        .json(&json!({"op": 3}))
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();
    let since: Vec<Value> = app.server.get("/edit/sincesave/a.txt").authorization_bearer(&alice).await.json();
    assert_eq!(since, vec![json!({"op": 3})]);

    let response = app.server.delete("/file/at/a.txt").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    app.server
        .post("/file/close/~alice/a.txt")
        .authorization_bearer(&bob)
        .await
        .assert_status_ok();

    // alice still holds read/write access; close it and delete from a read session
    let response = app.server.delete("/file/at/a.txt").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    app.server.post("/file/close/a.txt").authorization_bearer(&alice).await.assert_status_ok();
    app.server
        .get("/file/at/a.txt")
        .add_query_param("mode", "r")
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    let response = app.server.delete("/file/at/a.txt").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!app.storage.contains(&alice_id, "a.txt"));
    assert!(app.state.collab.sessions_for_user(&alice_id).is_empty());
    assert!(app.state.collab.is_consistent());
}

#[tokio::test]
async fn test_open_missing_file_is_not_found() {
    let app = test_app();
    let alice = login(&app.server, "alice").await;

    let response = app.server.get("/file/at/proj/missing.txt").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let open: BTreeMap<String, BTreeMap<String, EditMode>> =
        app.server.get("/file/listopen").authorization_bearer(&alice).await.json();
    assert!(open.is_empty());
}

#[tokio::test]
async fn test_open_read_while_writing_rejected() {
    let app = test_app();
    app.storage.insert(&UserIdentity::new("alice"), "a.txt", "x").unwrap();
    let alice = login(&app.server, "alice").await;

    app.server.get("/file/at/a.txt").authorization_bearer(&alice).await.assert_status_ok();
    let response = app
        .server
        .get("/file/at/a.txt")
        .add_query_param("mode", "r")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .get("/file/at/a.txt")
        .add_query_param("mode", "owner")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_validation() {
    let app = test_app();
    let alice_id = UserIdentity::new("alice");
    app.storage.insert(&alice_id, "a.txt", "x").unwrap();
    let alice = login(&app.server, "alice").await;

    // a plain save needs no session and creates the file
    app.server
        .put("/file/at/proj/new.txt")
        .text("fresh")
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();
    assert_eq!(read_text(&app.storage, &alice_id, "proj/new.txt"), "fresh");

    // a watermarked save needs a read/write session
    let response = app
        .server
        .put("/file/at/a.txt")
        .add_query_param("lastEdit", -1)
        .text("y")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    app.server.get("/file/at/a.txt").authorization_bearer(&alice).await.assert_status_ok();
    for bad in ["0", "-2", "later"] {
        let response = app
            .server
            .put("/file/at/a.txt")
            .add_query_param("lastEdit", bad)
            .text("y")
            .authorization_bearer(&alice)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "lastEdit={}", bad);
    }
    assert_eq!(read_text(&app.storage, &alice_id, "a.txt"), "x");
}

#[tokio::test]
async fn test_list_files_and_open_files() {
    let app = test_app();
    let alice_id = UserIdentity::new("alice");
    app.storage.insert(&alice_id, "proj/src/main.js", "").unwrap();
    app.storage.insert(&alice_id, "proj/index.html", "").unwrap();
    app.storage.insert(&UserIdentity::new("bob"), "shared/notes.md", "").unwrap();
    let alice = login(&app.server, "alice").await;

    let root: Vec<String> = app.server.get("/file/list").authorization_bearer(&alice).await.json();
    assert_eq!(root, vec!["proj/"]);

    let proj: Value = app.server.get("/file/list/proj").authorization_bearer(&alice).await.json();
    assert_eq!(proj, json!(["index.html", "src/"]));

    let response = app.server.get("/file/list/nope").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    app.server.get("/file/at/proj/src/main.js").authorization_bearer(&alice).await.assert_status_ok();
    app.server
        .get("/file/at/~bob/shared/notes.md")
        .add_query_param("mode", "r")
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    let open: Value = app.server.get("/file/listopen").authorization_bearer(&alice).await.json();
    assert_eq!(
        open,
        json!({
            "proj": {"src/main.js": "rw"},
            "~bob/shared": {"notes.md": "r"},
        })
    );
}

#[tokio::test]
async fn test_delete_missing_file_and_directory() {
    let app = test_app();
    app.storage.insert(&UserIdentity::new("alice"), "proj/a.txt", "").unwrap();
    let alice = login(&app.server, "alice").await;

    let response = app.server.delete("/file/at/proj/b.txt").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app.server.delete("/file/at/proj").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_close_without_session_is_ok() {
    let app = test_app();
    let alice = login(&app.server, "alice").await;
    app.server.post("/file/close/a.txt").authorization_bearer(&alice).await.assert_status_ok();
}

#[tokio::test]
async fn test_other_users_files_are_not_writable() {
    let app = test_app();
    let bob_id = UserIdentity::new("bob");
    app.storage.insert(&bob_id, "private/secret.txt", "bob's").unwrap();
    app.storage.insert(&bob_id, "private/keep.txt", "keep").unwrap();
    let mallory = login(&app.server, "mallory").await;

    let response = app
        .server
        .put("/file/at/~bob/private/secret.txt")
        .text("overwritten")
        .authorization_bearer(&mallory)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(read_text(&app.storage, &bob_id, "private/secret.txt"), "bob's");

    let response = app
        .server
        .delete("/file/at/~bob/private/keep.txt")
        .authorization_bearer(&mallory)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(app.storage.contains(&bob_id, "private/keep.txt"));

    for path in ["/file/list/~bob/private", "/file/list/~bob/"] {
        let response = app.server.get(path).authorization_bearer(&mallory).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{}", path);
    }

    // holding a read/write session does not grant saving into bob's area
    app.server
        .get("/file/at/~bob/private/secret.txt")
        .authorization_bearer(&mallory)
        .await
        .assert_status_ok();
    let response = app
        .server
        .put("/file/at/~bob/private/secret.txt")
        .add_query_param("lastEdit", -1)
        .text("overwritten")
        .authorization_bearer(&mallory)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(read_text(&app.storage, &bob_id, "private/secret.txt"), "bob's");

    // the owner can still address the file through the ~ prefix
    let bob = login(&app.server, "bob").await;
    let listing: Vec<String> = app.server.get("/file/list/~bob/private").authorization_bearer(&bob).await.json();
    assert_eq!(listing, vec!["keep.txt", "secret.txt"]);
}
