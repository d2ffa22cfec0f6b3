//! Storage Gateway Module
//!
//! Byte-level file access addressed by (user, path). The session coordinator
//! only ever talks to storage through the [`Storage`] trait; path resolution,
//! per-user area bootstrapping and template copying are the gateway's job.
//!
//! # Architecture
//!
//! - **`filesystem`** - `FileStorage`, one directory per user under a root
//! - **`memory`** - `MemoryStorage`, an in-process gateway with the same
//!   semantics, used by tests
//!
//! # Contract
//!
//! - `read` fails with `NotFound` for missing files and `IsDirectory` for
//!   directories
//! - `write` replaces the whole file, creating parent directories
//! - `delete` fails with `NotFound` for missing files and `IsDirectory` for
//!   directories
//! - `list` returns entries sorted by name

use serde::Serialize;

use crate::shared::{normalize_path, StorageError, UserIdentity};

/// Disk-backed gateway
pub mod filesystem;

/// In-memory gateway
pub mod memory;

pub use filesystem::FileStorage;
pub use memory::MemoryStorage;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// Entry name without any path prefix
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl DirEntry {
    /// Name as shown to clients: directories carry a trailing `/`.
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Byte I/O on per-user storage areas.
pub trait Storage: Send + Sync {
    /// Read a whole file.
    fn read(&self, user: &UserIdentity, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Replace a whole file.
    fn write(&self, user: &UserIdentity, path: &str, contents: &[u8]) -> Result<(), StorageError>;

    /// Remove a file.
    fn delete(&self, user: &UserIdentity, path: &str) -> Result<(), StorageError>;

    /// List a directory; the empty path is the root of the user's area.
    fn list(&self, user: &UserIdentity, path: &str) -> Result<Vec<DirEntry>, StorageError>;
}

/// Canonicalise a file path, rejecting escapes and the area root.
pub(crate) fn file_path(path: &str) -> Result<String, StorageError> {
    match normalize_path(path) {
        Some(normalized) if !normalized.is_empty() => Ok(normalized),
        _ => Err(StorageError::InvalidPath { path: path.to_string() }),
    }
}

/// Canonicalise a directory path; the empty string is allowed.
pub(crate) fn dir_path(path: &str) -> Result<String, StorageError> {
    normalize_path(path).ok_or_else(|| StorageError::InvalidPath { path: path.to_string() })
}
