/**
 * Identity Providers
 *
 * An identity provider turns login credentials into a `UserIdentity`. Two
 * are available:
 *
 * - `OpenAuthenticator` accepts any well-formed username without a password.
 *   This is the default when no users file is configured.
 * - `PasswordAuthenticator` checks a password against bcrypt hashes loaded
 *   from a TOML users file:
 *
 * ```toml
 * [users]
 * alice = "$2b$12$..."
 * ```
 */

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::shared::{ConfigError, UserIdentity};

/// Produces a user identity from credentials
pub trait IdentityProvider: Send + Sync {
    /// `None` when the credentials are rejected.
    fn authenticate(&self, username: &str, password: Option<&str>) -> Option<UserIdentity>;
}

/// Usernames become storage directory names, so they must be a single safe path segment.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username != "."
        && username != ".."
        && !username.starts_with('~')
        && !username.contains(['/', '\\'])
        && !username.chars().any(char::is_control)
}

/// Accepts every valid username
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAuthenticator;

impl IdentityProvider for OpenAuthenticator {
    fn authenticate(&self, username: &str, _password: Option<&str>) -> Option<UserIdentity> {
        is_valid_username(username).then(|| UserIdentity::new(username))
    }
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: HashMap<String, String>,
}

/// Checks passwords against bcrypt hashes
#[derive(Debug, Clone, Default)]
pub struct PasswordAuthenticator {
    hashes: HashMap<String, String>,
}

impl PasswordAuthenticator {
    pub fn new(hashes: HashMap<String, String>) -> Self {
        Self { hashes }
    }

    /// Parse the `[users]` table of a users file.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: UsersFile = toml::from_str(contents).map_err(|e| ConfigError::InvalidValue {
            key: "AUTH_USERS_FILE",
            message: e.to_string(),
        })?;
        if let Some(bad) = file.users.keys().find(|name| !is_valid_username(name)) {
            return Err(ConfigError::InvalidValue {
                key: "AUTH_USERS_FILE",
                message: format!("invalid username '{}'", bad),
            });
        }
        Ok(Self::new(file.users))
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn user_count(&self) -> usize {
        self.hashes.len()
    }
}

impl IdentityProvider for PasswordAuthenticator {
    fn authenticate(&self, username: &str, password: Option<&str>) -> Option<UserIdentity> {
        let hash = self.hashes.get(username)?;
        let password = password?;
        match bcrypt::verify(password, hash) {
            Ok(true) => Some(UserIdentity::new(username)),
            Ok(false) => None,
            Err(e) => {
                tracing::error!("Password verification error for {}: {:?}", username, e);
                None
            }
        }
    }
}
