/**
 * Login Handler
 *
 * POST /register/login/{username}, with an optional form body
 * `password=...`.
 *
 * A caller that already presents a valid token for the same username gets a
 * fresh token without re-authenticating. Everyone else goes through the
 * configured identity provider.
 */

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::HeaderMap,
    response::Json,
    Form,
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginForm};
use crate::backend::auth::state::AuthState;
use crate::backend::error::BackendError;
use crate::backend::middleware::bearer_token;

pub async fn login(
    State(auth): State<AuthState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", username);

    if let Some(token) = bearer_token(&headers) {
        if let Ok(claims) = auth.verify(token).await {
            if claims.sub == username {
                tracing::info!("{} already logged in; refreshing token", username);
                let token = auth.issue(&claims.identity())?;
                return Ok(Json(AuthResponse { token, username }));
            }
        }
    }

    let password = form.ok().and_then(|Form(form)| form.password);
    let user = auth.authenticate(&username, password.as_deref()).ok_or_else(|| {
        tracing::warn!("Invalid login for user: {}", username);
        BackendError::auth("Invalid login")
    })?;

    let token = auth.issue(&user)?;
    tracing::info!("User logged in successfully: {}", user);
    Ok(Json(AuthResponse {
        token,
        username: user.username().to_string(),
    }))
}
