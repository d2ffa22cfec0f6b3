/**
 * Authentication Handler Types
 *
 * Request and response types shared by the login, logout and userinfo handlers.
 */

use serde::{Deserialize, Serialize};

/// Form body of a login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub username: String,
}
