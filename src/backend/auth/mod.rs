//! Authentication Module
//!
//! Turns credentials into a `UserIdentity` and keeps track of login sessions.
//!
//! - **`provider`** - `IdentityProvider` trait; open and bcrypt-password implementations
//! - **`sessions`** - JWT creation and verification
//! - **`state`** - provider, token settings and revoked tokens shared by handlers
//! - **`handlers`** - login, logout and userinfo endpoints
//!
//! # Authentication Flow
//!
//! 1. **Login**: username (and password, if the provider wants one) → JWT returned
//! 2. **Requests**: `Authorization: Bearer <token>` → identity attached by the middleware
//! 3. **Logout**: the presented token's id is revoked

/// Identity providers
pub mod provider;

/// JWT token generation and validation
pub mod sessions;

/// Shared authentication state
pub mod state;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{login, logout, userinfo, AuthResponse, UserResponse};
pub use provider::{IdentityProvider, OpenAuthenticator, PasswordAuthenticator};
pub use state::AuthState;
