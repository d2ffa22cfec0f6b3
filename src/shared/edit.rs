/**
 * Edit Data Model
 *
 * Identities, file handles, access modes and the opaque edit payloads that
 * clients buffer against an open file. These types travel over HTTP as JSON
 * and are used unchanged by the session coordinator.
 */
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::CollabError;

/// Opaque user identity.
///
/// Two identities are the same user iff their usernames match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn username(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalise a slash-separated path.
///
/// Leading and trailing slashes, empty segments and `.` segments are dropped.
/// Returns `None` if any segment is `..`. The empty string denotes the root of
/// a user's area.
pub fn normalize_path(path: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return None,
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Canonical identifier of a file inside one user's storage area.
///
/// Equality and hashing are by (owner, canonical path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHandle {
    owner: UserIdentity,
    path: String,
}

impl FileHandle {
    /// Build a handle, canonicalising `path`.
    ///
    /// Fails with a validation error when the path escapes the owner's area or
    /// names the area itself.
    pub fn new(owner: UserIdentity, path: &str) -> Result<Self, CollabError> {
        let path = normalize_path(path)
            .ok_or_else(|| CollabError::validation("path", format!("path '{}' escapes the storage area", path)))?;
        if path.is_empty() {
            return Err(CollabError::validation("path", "a file path is required"));
        }
        Ok(Self { owner, path })
    }

    /// User whose storage area holds the file.
    pub fn owner(&self) -> &UserIdentity {
        &self.owner
    }

    /// Canonical path relative to the owner's area, without a leading slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First path segment, which the editor treats as the project name.
    pub fn project(&self) -> &str {
        self.path.split('/').next().unwrap_or_default()
    }

    /// Path below the project directory; empty for a file at the area root.
    pub fn project_path(&self) -> &str {
        self.path.split_once('/').map(|(_, rest)| rest).unwrap_or_default()
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}/{}", self.owner, self.path)
    }
}

/// Access mode of an edit session.
// Room for further modes (owner, collaborator, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditMode {
    /// Shared, read-only access
    #[serde(rename = "r")]
    Read,
    /// Exclusive read/write access; only one holder per file
    #[serde(rename = "rw")]
    ReadWrite,
}

impl EditMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "rw",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditMode {
    type Err = CollabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" | "read" => Ok(Self::Read),
            "rw" | "readwrite" => Ok(Self::ReadWrite),
            other => Err(CollabError::validation("mode", format!("unknown edit mode '{}'", other))),
        }
    }
}

/// One client-defined change record.
///
/// The payload is never interpreted by the server; it is kept exactly as
/// received and returned in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditOperation(serde_json::Value);

impl EditOperation {
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }

    /// Parse a request body holding either one operation or an array of them.
    pub fn parse_batch(body: &[u8]) -> Result<Vec<Self>, CollabError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        Ok(match value {
            serde_json::Value::Array(items) => items.into_iter().map(Self).collect(),
            single => vec![Self(single)],
        })
    }
}
