//! Authentication API integration tests
//!
//! Login, logout, userinfo, and rejection of unauthenticated requests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use coedit::backend::auth::{AuthResponse, PasswordAuthenticator, UserResponse};

use crate::common::{auth_header, login, test_app, test_app_with};

#[tokio::test]
async fn test_login_and_userinfo() {
    let app = test_app();
    let token = login(&app.server, "alice").await;

    let response = app
        .server
        .get("/register/userinfo")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&auth_header(&token)).unwrap())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<UserResponse>().username, "alice");
}

#[tokio::test]
async fn test_requests_without_token_rejected() {
    let app = test_app();

    for path in ["/register/userinfo", "/file/listopen", "/file/list", "/settings"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
    }

    let response = app.server.get("/file/listopen").authorization_bearer("not.a.token").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_username_rejected() {
    let app = test_app();
    let response = app.server.post("/register/login/~bob").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = test_app();
    let token = login(&app.server, "alice").await;
    let other = login(&app.server, "alice").await;

    let response = app.server.post("/register/logout").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.get("/register/userinfo").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.get("/register/userinfo").authorization_bearer(&other).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_relogin_with_valid_token_refreshes() {
    let mut hashes = HashMap::new();
    hashes.insert("alice".to_string(), bcrypt::hash("secret", 4).unwrap());
    let app = test_app_with(Arc::new(PasswordAuthenticator::new(hashes)));

    let response = app.server.post("/register/login/alice").form(&[("password", "secret")]).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let token = response.json::<AuthResponse>().token;

    // no password needed while the token is valid
    let response = app.server.post("/register/login/alice").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_ne!(response.json::<AuthResponse>().token, token);

    // but the token doesn't vouch for another user
    let response = app.server.post("/register/login/bob").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_login() {
    let mut hashes = HashMap::new();
    hashes.insert("alice".to_string(), bcrypt::hash("secret", 4).unwrap());
    let app = test_app_with(Arc::new(PasswordAuthenticator::new(hashes)));

    let response = app.server.post("/register/login/alice").form(&[("password", "wrong")]).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.post("/register/login/alice").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.server.post("/register/login/alice").form(&[("password", "secret")]).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<AuthResponse>().username, "alice");
}
