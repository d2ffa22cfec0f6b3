/**
 * Backend Error Types
 *
 * This module defines the errors HTTP handlers return. They wrap the
 * coordinator's `CollabError` and add the request-level failures the
 * coordinator never sees.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Malformed requests: bad query values, unparsable bodies, missing keys.
 *
 * ## State Errors
 *
 * Failures of the server's own machinery, such as a blocking task that
 * panicked or was cancelled.
 *
 * ## Auth Errors
 *
 * Missing, malformed, expired or revoked credentials.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{CollabError, StatusKind};

/// Backend-specific error types
///
/// ```rust
/// use coedit::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid query value or body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Server machinery failure
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// Credentials missing or rejected
    #[error("Auth error: {message}")]
    AuthError {
        /// Human-readable error message
        message: String,
    },

    /// Rejection or failure from the file-session coordinator
    #[error(transparent)]
    Collab(#[from] CollabError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// - `HandlerError` - the status code carried by the error
    /// - `StateError` - 500 Internal Server Error
    /// - `AuthError` - 401 Unauthorized
    /// - `Collab` - conflict 409, invalid state and validation 400, not found 404
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthError { .. } => StatusCode::UNAUTHORIZED,
            Self::Collab(err) => status_for(err.kind()),
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message } => message.clone(),
            Self::AuthError { message } => message.clone(),
            Self::Collab(err) => err.to_string(),
        }
    }
}

/// Externally visible code for a coordinator status kind.
pub fn status_for(kind: StatusKind) -> StatusCode {
    match kind {
        StatusKind::Success => StatusCode::OK,
        StatusKind::NotFound => StatusCode::NOT_FOUND,
        StatusKind::BadRequest => StatusCode::BAD_REQUEST,
        StatusKind::Conflict => StatusCode::CONFLICT,
        StatusKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::state(format!("Background task failed: {}", err))
    }
}
