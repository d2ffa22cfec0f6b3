//! Shared Module
//!
//! This module contains types that both the server and its clients agree on.
//! None of them depend on the HTTP stack, so they are always compiled.
//!
//! # Overview
//!
//! - `edit` - identities, file handles, edit modes and opaque edit operations
//! - `error` - the coordinator's error taxonomy and storage errors
//! - `config` - application configuration and its builder

/// Identities, file handles and edit payloads
pub mod edit;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use edit::{normalize_path, EditMode, EditOperation, FileHandle, UserIdentity};
pub use error::{CollabError, StatusKind, StorageError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
