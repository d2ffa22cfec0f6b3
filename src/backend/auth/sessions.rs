/**
 * Session Tokens
 *
 * Login hands out an HS256 JWT whose subject is the username. Every token
 * carries a unique `jti` so a single token can be revoked on logout without
 * touching the user's other sessions.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::UserIdentity;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Token id, used for revocation
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.sub.clone())
    }
}

fn now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// Create a token for `user` that expires after `ttl_secs`.
pub fn create_token(user: &UserIdentity, secret: &str, ttl_secs: u64) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = now();
    let claims = Claims {
        sub: user.username().to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: iat + ttl_secs,
        iat,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Verify the signature and expiry of a token and decode its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())?;
    Ok(data.claims)
}
