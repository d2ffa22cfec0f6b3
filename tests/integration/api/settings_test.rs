//! Settings API integration tests

use std::collections::BTreeMap;

use axum::http::StatusCode;

use crate::assert_contains;
use crate::common::{login, test_app};

const FORM: &str = "application/x-www-form-urlencoded";

#[tokio::test]
async fn test_settings_round_trip() {
    let app = test_app();
    let alice = login(&app.server, "alice").await;
    let bob = login(&app.server, "bob").await;

    app.server
        .post("/settings")
        .text("tabsize=4&font=Monaco%2C+monospace")
        .content_type(FORM)
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    let all: BTreeMap<String, String> = app.server.get("/settings").authorization_bearer(&alice).await.json();
    assert_eq!(all.len(), 2);
    assert_eq!(all["font"], "Monaco, monospace");

    let tabsize: String = app.server.get("/settings/tabsize").authorization_bearer(&alice).await.json();
    assert_eq!(tabsize, "4");

    let response = app.server.get("/settings/tabsize").authorization_bearer(&bob).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    app.server.delete("/settings/tabsize").authorization_bearer(&alice).await.assert_status_ok();
    let response = app.server.get("/settings/tabsize").authorization_bearer(&alice).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unset_setting_succeeds() {
    let app = test_app();
    let alice = login(&app.server, "alice").await;

    app.server
        .post("/settings")
        .form(&[("theme", "dark")])
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    app.server.delete("/settings/tabsize").authorization_bearer(&alice).await.assert_status_ok();
    app.server.delete("/settings/theme").authorization_bearer(&alice).await.assert_status_ok();
    app.server.delete("/settings/theme").authorization_bearer(&alice).await.assert_status_ok();

    let all: BTreeMap<String, String> = app.server.get("/settings").authorization_bearer(&alice).await.json();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_settings_rejects_bad_bodies() {
    let app = test_app();
    let alice = login(&app.server, "alice").await;

    let response = app
        .server
        .post("/settings")
        .form(&[("tabsize", "4"), ("", "x")])
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_contains!(response.text(), "can't be empty");

    // not url-encoded
    let response = app
        .server
        .post("/settings")
        .text("tabsize=4")
        .authorization_bearer(&alice)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let all: BTreeMap<String, String> = app.server.get("/settings").authorization_bearer(&alice).await.json();
    assert!(all.is_empty());
}
