//! Collaborative File-Session Module
//!
//! Tracks which users have which files open and in which mode, arbitrates
//! conflicting open/save/delete requests, and buffers each read/write
//! session's ordered log of edit operations until the next save.
//!
//! # Architecture
//!
//! - **`session`** - `EditSession`: one user on one file, plus the edit buffer
//! - **`registry`** - `SessionRegistry`: live sessions indexed by file and by user
//! - **`arbiter`** - stateless open/save/delete policy
//! - **`state`** - `CollabState`: the mutex-guarded coordinator running the workflows
//! - **`handlers`** - `/file` and `/edit` HTTP endpoints
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use coedit::backend::collab::CollabState;
//! use coedit::backend::storage::MemoryStorage;
//! use coedit::shared::{EditMode, FileHandle, UserIdentity};
//!
//! let alice = UserIdentity::new("alice");
//! let storage = MemoryStorage::new();
//! storage.insert(&alice, "proj/a.txt", "hello").unwrap();
//!
//! let collab = CollabState::new(Arc::new(storage));
//! let file = FileHandle::new(alice.clone(), "proj/a.txt").unwrap();
//! let opened = collab.open_file(&alice, &file, EditMode::ReadWrite).unwrap();
//! assert_eq!(opened.contents, b"hello");
//! ```

/// Edit sessions and the edit buffer
pub mod session;

/// Session registry
pub mod registry;

/// Access arbitration
pub mod arbiter;

/// File-session coordinator
pub mod state;

/// HTTP handlers for files and edits
pub mod handlers;

pub use arbiter::OpenDecision;
pub use registry::SessionRegistry;
pub use session::{EditSession, NO_SAVE};
pub use state::{CollabState, OpenFiles, OpenedFile};
