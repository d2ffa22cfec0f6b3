//! Shared Error Types
//!
//! This module defines the error taxonomy of the file-session coordinator and
//! of the storage gateway it drives.
//!
//! # Error Categories
//!
//! - `ConflictError` - exclusive access collides with another user, or a
//!   delete is blocked by open sessions
//! - `InvalidStateError` - operation attempted in a mode that forbids it
//! - `NotFoundError` - missing session or missing file
//! - `ValidationError` - malformed input such as an out-of-range edit index
//! - `StorageError` - failure reported by the storage gateway
//! - `SerializationError` - undecodable edit payloads
//!
//! Every error is local to a single request and is never retried by the
//! coordinator.
//!
//! # Usage
//!
//! ```rust
//! use coedit::shared::error::{CollabError, StatusKind};
//!
//! let error = CollabError::conflict("User \"bob\" is already editing the requested file");
//! assert_eq!(error.kind(), StatusKind::Conflict);
//! ```
use thiserror::Error;

/// Externally visible outcome classes relayed by the request router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    NotFound,
    BadRequest,
    Conflict,
    ServerError,
}

/// Errors raised by storage gateways
#[derive(Debug, Error)]
pub enum StorageError {
    /// No file or directory at the requested path
    #[error("File not found: {path}")]
    NotFound {
        /// Path relative to the user's area
        path: String,
    },

    /// The path names a directory where a file was expected
    #[error("Passed file {path} is a directory not a file")]
    IsDirectory {
        /// Path relative to the user's area
        path: String,
    },

    /// The path escapes the user's area or names its root
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// Path as supplied by the caller
        path: String,
    },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::NotFound { .. } => StatusKind::NotFound,
            Self::IsDirectory { .. } | Self::InvalidPath { .. } => StatusKind::BadRequest,
            Self::Io(_) => StatusKind::ServerError,
        }
    }
}

/// Errors returned by the file-session coordinator
#[derive(Debug, Error)]
pub enum CollabError {
    /// Requested access collides with another session
    #[error("Conflict: {message}")]
    ConflictError {
        /// Human-readable error message
        message: String,
    },

    /// Operation attempted in a mode that forbids it
    #[error("Invalid state: {message}")]
    InvalidStateError {
        /// Human-readable error message
        message: String,
    },

    /// A required session or file does not exist
    #[error("Not found: {message}")]
    NotFoundError {
        /// Human-readable error message
        message: String,
    },

    /// Malformed request input
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The input that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Failure reported by the storage gateway
    #[error(transparent)]
    StorageError(#[from] StorageError),

    /// Edit payload could not be decoded
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },
}

impl CollabError {
    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::ConflictError {
            message: message.into(),
        }
    }

    /// Create a new invalid-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidStateError {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFoundError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Map the error onto the status kind the router should surface.
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::ConflictError { .. } => StatusKind::Conflict,
            Self::InvalidStateError { .. } | Self::ValidationError { .. } => StatusKind::BadRequest,
            Self::NotFoundError { .. } => StatusKind::NotFound,
            Self::StorageError(err) => err.kind(),
            Self::SerializationError { .. } => StatusKind::BadRequest,
        }
    }
}

impl From<serde_json::Error> for CollabError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: format!("JSON error: {}", err),
        }
    }
}
