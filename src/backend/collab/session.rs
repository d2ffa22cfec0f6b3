/**
 * Edit Sessions and the Edit Buffer
 *
 * An edit session binds one user to one file in one access mode. Read/write
 * sessions also carry the user's ordered log of pending edit operations and a
 * watermark marking how much of that log the last save included.
 *
 * Invariant: `-1 <= watermark <= len(log) - 1`, so the watermark is `-1`
 * whenever the log is empty.
 */

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::{CollabError, EditMode, EditOperation, FileHandle, UserIdentity};

/// Watermark of a session whose edits have never been saved.
pub const NO_SAVE: i64 = -1;

/// Per (file, user) session state
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    id: Uuid,
    file: FileHandle,
    user: UserIdentity,
    mode: EditMode,
    /// `None` for read sessions
    edits: Option<Vec<EditOperation>>,
    watermark: i64,
    opened_at: DateTime<Utc>,
}

impl EditSession {
    /// Only the registry creates sessions.
    pub(crate) fn new(file: FileHandle, user: UserIdentity, mode: EditMode) -> Self {
        let edits = match mode {
            EditMode::ReadWrite => Some(Vec::new()),
            EditMode::Read => None,
        };
        Self {
            id: Uuid::new_v4(),
            file,
            user,
            mode,
            edits,
            watermark: NO_SAVE,
            opened_at: Utc::now(),
        }
    }

    /// Unique per opened session; a reused session keeps its id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file(&self) -> &FileHandle {
        &self.file
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Index of the last operation included in the most recent save.
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Number of buffered operations; zero for read sessions.
    pub fn edit_count(&self) -> usize {
        self.edits.as_ref().map_or(0, Vec::len)
    }

    /// Append operations after everything already buffered, in the given order.
    ///
    /// Fails with an invalid-state error on a read session.
    pub fn append<I>(&mut self, ops: I) -> Result<(), CollabError>
    where
        I: IntoIterator<Item = EditOperation>,
    {
        match self.edits.as_mut() {
            Some(edits) => {
                edits.extend(ops);
                Ok(())
            }
            None => Err(CollabError::invalid_state("Edit session is read-only; can't add edits")),
        }
    }

    /// Copy of the full log; empty for read sessions.
    pub fn edits(&self) -> Vec<EditOperation> {
        self.edits.clone().unwrap_or_default()
    }

    /// Operations from `index` (inclusive) to the end.
    ///
    /// `index == len` yields an empty list; anything beyond is a validation
    /// error.
    pub fn edits_since(&self, index: usize) -> Result<Vec<EditOperation>, CollabError> {
        let edits = self.edits.as_deref().unwrap_or_default();
        if index > edits.len() {
            return Err(CollabError::validation(
                "index",
                format!("edit index {} is beyond the {} buffered edits", index, edits.len()),
            ));
        }
        Ok(edits[index..].to_vec())
    }

    /// Operations strictly after the watermark.
    pub fn edits_since_last_save(&self) -> Vec<EditOperation> {
        let edits = self.edits.as_deref().unwrap_or_default();
        // Watermark is always within -1..len, so this cannot go past the end.
        let start = usize::try_from(self.watermark + 1).unwrap_or(0).min(edits.len());
        edits[start..].to_vec()
    }

    /// Check that `index` could become the watermark without changing anything.
    pub fn check_watermark(&self, index: i64) -> Result<(), CollabError> {
        if self.mode != EditMode::ReadWrite {
            return Err(CollabError::invalid_state("File not open for read/write access"));
        }
        let last = self.edit_count() as i64 - 1;
        if index < NO_SAVE || index > last {
            return Err(CollabError::validation(
                "lastEdit",
                format!("last edit index {} is outside -1..={}", index, last),
            ));
        }
        Ok(())
    }

    /// Record that the save included every operation up to `index`.
    pub fn advance_watermark(&mut self, index: i64) -> Result<(), CollabError> {
        self.check_watermark(index)?;
        self.watermark = index;
        Ok(())
    }

    /// Drop all buffered operations without closing the session.
    pub fn clear_edits(&mut self) {
        if let Some(edits) = self.edits.as_mut() {
            edits.clear();
        }
        // keep the watermark inside the (now empty) log
        self.watermark = NO_SAVE;
    }
}
