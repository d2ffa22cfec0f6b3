/**
 * Session Registry
 *
 * Authoritative in-memory table of every live edit session, indexed both by
 * file and by user. The two indices always agree: a live session sits in
 * exactly one file bucket and its (file) key sits in exactly one user bucket.
 *
 * The registry itself is a plain data structure. Atomicity comes from the
 * single mutex `CollabState` wraps it in.
 */

use std::collections::HashMap;

use crate::backend::collab::session::EditSession;
use crate::shared::{CollabError, EditMode, FileHandle, UserIdentity};

/// Live sessions, indexed by file and by user
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Owns the sessions
    by_file: HashMap<FileHandle, Vec<EditSession>>,
    /// Files each user has open
    by_user: HashMap<UserIdentity, Vec<FileHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and index a session for (file, user).
    ///
    /// Fails with a conflict if the pair already has one.
    pub fn open(&mut self, file: &FileHandle, user: &UserIdentity, mode: EditMode) -> Result<&EditSession, CollabError> {
        if self.find(file, user).is_some() {
            return Err(CollabError::conflict("Edit session already exists"));
        }

        self.by_user.entry(user.clone()).or_default().push(file.clone());
        let bucket = self.by_file.entry(file.clone()).or_default();
        let index = bucket.len();
        bucket.push(EditSession::new(file.clone(), user.clone(), mode));
        tracing::debug!("Opened {} session on {} for {}", mode, file, user);
        Ok(&bucket[index])
    }

    /// Remove the session for (file, user) from both indices.
    ///
    /// Returns the removed session; closing an absent session is a no-op.
    pub fn close(&mut self, file: &FileHandle, user: &UserIdentity) -> Option<EditSession> {
        let bucket = self.by_file.get_mut(file)?;
        let index = bucket.iter().position(|session| session.user() == user)?;
        let session = bucket.remove(index);
        if bucket.is_empty() {
            self.by_file.remove(file);
        }

        if let Some(files) = self.by_user.get_mut(user) {
            files.retain(|open| open != file);
            if files.is_empty() {
                self.by_user.remove(user);
            }
        }
        tracing::debug!("Closed {} session on {} for {}", session.mode(), file, user);
        Some(session)
    }

    /// Close every session on `file`, returning them.
    pub fn close_all(&mut self, file: &FileHandle) -> Vec<EditSession> {
        let users: Vec<UserIdentity> = self
            .by_file
            .get(file)
            .map(|bucket| bucket.iter().map(|session| session.user().clone()).collect())
            .unwrap_or_default();
        users.iter().filter_map(|user| self.close(file, user)).collect()
    }

    pub fn find(&self, file: &FileHandle, user: &UserIdentity) -> Option<&EditSession> {
        self.by_file.get(file)?.iter().find(|session| session.user() == user)
    }

    pub fn find_mut(&mut self, file: &FileHandle, user: &UserIdentity) -> Option<&mut EditSession> {
        self.by_file.get_mut(file)?.iter_mut().find(|session| session.user() == user)
    }

    /// Live sessions on `file`, borrowed.
    pub fn sessions_on(&self, file: &FileHandle) -> &[EditSession] {
        self.by_file.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    /// Snapshot of the sessions on `file`.
    pub fn sessions_for_file(&self, file: &FileHandle) -> Vec<EditSession> {
        self.sessions_on(file).to_vec()
    }

    /// Snapshot of the sessions held by `user`.
    pub fn sessions_for_user(&self, user: &UserIdentity) -> Vec<EditSession> {
        self.by_user
            .get(user)
            .map(|files| files.iter().filter_map(|file| self.find(file, user).cloned()).collect())
            .unwrap_or_default()
    }

    /// Clear the log of every session on `file`; sessions stay open.
    pub fn reset_edits(&mut self, file: &FileHandle) {
        if let Some(bucket) = self.by_file.get_mut(file) {
            bucket.iter_mut().for_each(EditSession::clear_edits);
        }
    }

    /// Clear the log of every live session.
    pub fn reset_all_edits(&mut self) {
        self.by_file
            .values_mut()
            .flat_map(|bucket| bucket.iter_mut())
            .for_each(EditSession::clear_edits);
    }

    /// Total number of live sessions.
    pub fn len(&self) -> usize {
        self.by_file.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }

    /// Whether both indices describe the same set of sessions and no pair has
    /// more than one.
    pub fn is_consistent(&self) -> bool {
        let mut pairs = 0;
        for (file, bucket) in &self.by_file {
            if bucket.is_empty() {
                return false;
            }
            for (i, session) in bucket.iter().enumerate() {
                if session.file() != file {
                    return false;
                }
                if bucket[..i].iter().any(|earlier| earlier.user() == session.user()) {
                    return false;
                }
                let indexed = self
                    .by_user
                    .get(session.user())
                    .map_or(0, |files| files.iter().filter(|open| *open == file).count());
                if indexed != 1 {
                    return false;
                }
                pairs += 1;
            }
        }
        let indexed_total: usize = self.by_user.values().map(Vec::len).sum();
        pairs == indexed_total && self.by_user.values().all(|files| !files.is_empty())
    }
}
