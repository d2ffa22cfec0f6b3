/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user. The middleware reads the
 * bearer token from the Authorization header, verifies it (signature, expiry
 * and revocation) and attaches the caller's identity to the request
 * extensions, where the `AuthUser` extractor picks it up.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::Claims;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::UserIdentity;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub identity: UserIdentity,
    pub claims: Claims,
}

/// The token of a `Bearer <token>` Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
///
/// Returns 401 Unauthorized if the token is missing, invalid, expired or revoked.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::auth("You're not logged in")
    })?;

    let claims = app_state.auth.verify(token).await?;
    request.extensions_mut().insert(AuthenticatedUser {
        identity: claims.identity(),
        claims,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user set by `auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn identity(&self) -> &UserIdentity {
        &self.0.identity
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::auth("You're not logged in")
            })?;

        Ok(AuthUser(user))
    }
}
