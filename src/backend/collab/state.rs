/**
 * File-Session Coordinator
 *
 * `CollabState` owns the session registry and the storage gateway and runs
 * the open, save, delete and close workflows on top of them.
 *
 * Every workflow takes one process-wide mutex for its whole duration,
 * storage I/O included. All file-session activity for all files is therefore
 * serialized; there is no per-file parallelism and no lock timeout. The
 * workflows are blocking, so async callers should run them through
 * `tokio::task::spawn_blocking`.
 */

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::collab::arbiter::{check_delete, check_save, decide_open, OpenDecision};
use crate::backend::collab::registry::SessionRegistry;
use crate::backend::collab::session::EditSession;
use crate::backend::storage::Storage;
use crate::shared::{CollabError, EditMode, EditOperation, FileHandle, UserIdentity};

/// Result of a successful open: the caller's session and the file's bytes.
#[derive(Debug, Clone)]
pub struct OpenedFile {
    pub session: EditSession,
    pub contents: Vec<u8>,
}

/// Open files of one user, grouped by project then by path below the project.
pub type OpenFiles = BTreeMap<String, BTreeMap<String, EditMode>>;

/// Coordinator shared by every request handler
#[derive(Clone)]
pub struct CollabState {
    registry: Arc<Mutex<SessionRegistry>>,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for CollabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollabState").finish_non_exhaustive()
    }
}

impl CollabState {
    /// Create a coordinator with an empty registry over `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(SessionRegistry::new())),
            storage,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    fn lock(&self) -> MutexGuard<'_, SessionRegistry> {
        // A panic mid-workflow never leaves the registry half-updated, since
        // every mutation happens after the fallible steps.
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open `file` for `user` in `mode` and return its current contents.
    ///
    /// Arbitration and the storage read both happen before the registry is
    /// touched, so a rejected or failed open leaves no trace.
    pub fn open_file(&self, user: &UserIdentity, file: &FileHandle, mode: EditMode) -> Result<OpenedFile, CollabError> {
        let mut registry = self.lock();

        let decision = decide_open(registry.sessions_on(file), user, mode).inspect_err(|e| {
            tracing::warn!("[Collab] {} denied {} access to {}: {}", user, mode, file, e);
        })?;
        let contents = self.storage.read(file.owner(), file.path())?;

        let session = match decision {
            OpenDecision::Reuse => registry
                .find(file, user)
                .cloned()
                .ok_or_else(|| CollabError::not_found("Edit session disappeared"))?,
            OpenDecision::Upgrade => {
                registry.close(file, user);
                registry.open(file, user, mode)?.clone()
            }
            OpenDecision::Open => registry.open(file, user, mode)?.clone(),
        };

        tracing::info!("[Collab] {} opened {} ({}, {:?})", user, file, mode, decision);
        Ok(OpenedFile { session, contents })
    }

    /// Replace the whole content of `file`.
    ///
    /// With `last_edit`, the caller must hold a read/write session and the
    /// index must fall inside its log; the watermark only moves once the
    /// write has succeeded.
    pub fn save_file(
        &self,
        user: &UserIdentity,
        file: &FileHandle,
        contents: &[u8],
        last_edit: Option<i64>,
    ) -> Result<(), CollabError> {
        let mut registry = self.lock();

        check_save(registry.find(file, user), last_edit).inspect_err(|e| {
            tracing::warn!("[Collab] {} can't save {}: {}", user, file, e);
        })?;
        self.storage
            .write(file.owner(), file.path(), contents)
            .inspect_err(|e| tracing::error!("[Collab] Writing {} failed: {}", file, e))?;

        if let Some(index) = last_edit {
            if let Some(session) = registry.find_mut(file, user) {
                session.advance_watermark(index)?;
            }
        }
        tracing::info!("[Collab] {} saved {} ({} bytes, last edit {:?})", user, file, contents.len(), last_edit);
        Ok(())
    }

    /// Delete `file` and close every session on it.
    pub fn delete_file(&self, user: &UserIdentity, file: &FileHandle) -> Result<(), CollabError> {
        let mut registry = self.lock();

        check_delete(registry.sessions_on(file), user).inspect_err(|e| {
            tracing::warn!("[Collab] {} can't delete {}: {}", user, file, e);
        })?;
        self.storage.delete(file.owner(), file.path())?;

        let closed = registry.close_all(file);
        tracing::info!("[Collab] {} deleted {} (closed {} sessions)", user, file, closed.len());
        Ok(())
    }

    /// Close the caller's own session; returns whether one was open.
    pub fn close_file(&self, user: &UserIdentity, file: &FileHandle) -> bool {
        let closed = self.lock().close(file, user).is_some();
        if closed {
            tracing::info!("[Collab] {} closed {}", user, file);
        }
        closed
    }

    /// Buffer `ops` at the end of the caller's log; returns the new log length.
    pub fn append_edits(
        &self,
        user: &UserIdentity,
        file: &FileHandle,
        ops: Vec<EditOperation>,
    ) -> Result<usize, CollabError> {
        let mut registry = self.lock();
        let session = registry
            .find_mut(file, user)
            .ok_or_else(|| CollabError::not_found(format!("{} has no edit session on {}", user, file)))?;
        let count = ops.len();
        session.append(ops)?;
        tracing::debug!("[Collab] {} buffered {} edits on {}", user, count, file);
        Ok(session.edit_count())
    }

    /// Full copy of the caller's log; empty without a session.
    pub fn edits(&self, user: &UserIdentity, file: &FileHandle) -> Vec<EditOperation> {
        self.lock().find(file, user).map(EditSession::edits).unwrap_or_default()
    }

    /// The caller's log from `index` on. Without a session the log counts as empty.
    pub fn edits_since(&self, user: &UserIdentity, file: &FileHandle, index: usize) -> Result<Vec<EditOperation>, CollabError> {
        match self.lock().find(file, user) {
            Some(session) => session.edits_since(index),
            None if index == 0 => Ok(Vec::new()),
            None => Err(CollabError::validation(
                "index",
                format!("edit index {} is beyond the 0 buffered edits", index),
            )),
        }
    }

    pub fn edits_since_last_save(&self, user: &UserIdentity, file: &FileHandle) -> Vec<EditOperation> {
        self.lock()
            .find(file, user)
            .map(EditSession::edits_since_last_save)
            .unwrap_or_default()
    }

    pub fn find(&self, user: &UserIdentity, file: &FileHandle) -> Option<EditSession> {
        self.lock().find(file, user).cloned()
    }

    pub fn sessions_for_file(&self, file: &FileHandle) -> Vec<EditSession> {
        self.lock().sessions_for_file(file)
    }

    pub fn sessions_for_user(&self, user: &UserIdentity) -> Vec<EditSession> {
        self.lock().sessions_for_user(user)
    }

    pub fn reset_edits(&self, file: &FileHandle) {
        self.lock().reset_edits(file);
        tracing::info!("[Collab] Reset edits on {}", file);
    }

    pub fn reset_all_edits(&self) {
        self.lock().reset_all_edits();
        tracing::info!("[Collab] Reset all edits");
    }

    /// The caller's open files, keyed by project.
    ///
    /// Files in another user's area are listed under `~owner/project`.
    pub fn list_open(&self, user: &UserIdentity) -> OpenFiles {
        let mut open = OpenFiles::new();
        for session in self.sessions_for_user(user) {
            let file = session.file();
            let project = if file.owner() == user {
                file.project().to_string()
            } else {
                format!("~{}/{}", file.owner(), file.project())
            };
            open.entry(project)
                .or_default()
                .insert(file.project_path().to_string(), session.mode());
        }
        open
    }

    /// Whether the registry's indices agree with each other.
    pub fn is_consistent(&self) -> bool {
        self.lock().is_consistent()
    }
}
