/**
 * Authentication State
 *
 * Holds the identity provider, token settings and the set of revoked token
 * ids. Revoked ids are forgotten once the token they name has expired.
 */

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::auth::provider::IdentityProvider;
use crate::backend::auth::sessions::{create_token, verify_token, Claims};
use crate::backend::error::BackendError;
use crate::shared::UserIdentity;

#[derive(Clone)]
pub struct AuthState {
    provider: Arc<dyn IdentityProvider>,
    secret: Arc<str>,
    ttl_secs: u64,
    /// jti -> exp
    revoked: Arc<RwLock<HashMap<String, u64>>>,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState").field("ttl_secs", &self.ttl_secs).finish_non_exhaustive()
    }
}

impl AuthState {
    pub fn new(provider: Arc<dyn IdentityProvider>, secret: impl Into<Arc<str>>, ttl_secs: u64) -> Self {
        Self {
            provider,
            secret: secret.into(),
            ttl_secs,
            revoked: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn authenticate(&self, username: &str, password: Option<&str>) -> Option<UserIdentity> {
        self.provider.authenticate(username, password)
    }

    /// Issue a fresh token for `user`.
    pub fn issue(&self, user: &UserIdentity) -> Result<String, BackendError> {
        create_token(user, &self.secret, self.ttl_secs).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            BackendError::state("Failed to create session token")
        })
    }

    /// Decode a token, rejecting bad signatures, expired tokens and revoked ones.
    pub async fn verify(&self, token: &str) -> Result<Claims, BackendError> {
        let claims = verify_token(token, &self.secret).map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            BackendError::auth("Invalid or expired token")
        })?;
        if self.revoked.read().await.contains_key(&claims.jti) {
            tracing::warn!("Revoked token presented for {}", claims.sub);
            return Err(BackendError::auth("Token has been revoked"));
        }
        Ok(claims)
    }

    /// Revoke one token.
    pub async fn revoke(&self, claims: &Claims) {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti.clone(), claims.exp);
    }
}
