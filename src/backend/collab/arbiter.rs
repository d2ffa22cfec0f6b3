/**
 * Access Arbitration
 *
 * Stateless policy for open, save and delete requests. Each check looks only
 * at the sessions currently live on the target file and never mutates
 * anything; callers apply the decision afterwards while still holding the
 * registry lock.
 */

use crate::backend::collab::session::EditSession;
use crate::shared::{CollabError, EditMode, UserIdentity};

/// Outcome of open-file arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenDecision {
    /// The caller already holds a session in the requested mode
    Reuse,
    /// Replace the caller's read session with a read/write one
    Upgrade,
    /// Open a fresh session in the requested mode
    Open,
}

/// Decide an open request for `user` in `mode` against the sessions on a file.
pub fn decide_open(sessions: &[EditSession], user: &UserIdentity, mode: EditMode) -> Result<OpenDecision, CollabError> {
    let own = sessions.iter().find(|session| session.user() == user);

    if mode == EditMode::ReadWrite
        && sessions
            .iter()
            .any(|session| session.user() != user && session.mode() == EditMode::ReadWrite)
    {
        return Err(CollabError::conflict("File is being edited by another user"));
    }

    match own.map(EditSession::mode) {
        Some(EditMode::ReadWrite) if mode == EditMode::Read => Err(CollabError::invalid_state(
            "Can't open file read-only; already open for read/write access",
        )),
        Some(current) if current == mode => Ok(OpenDecision::Reuse),
        Some(_) => Ok(OpenDecision::Upgrade),
        None => Ok(OpenDecision::Open),
    }
}

/// Check a save carrying an optional last-edit index against the caller's session.
pub fn check_save(session: Option<&EditSession>, last_edit: Option<i64>) -> Result<(), CollabError> {
    let Some(index) = last_edit else {
        return Ok(());
    };
    match session {
        Some(session) => session.check_watermark(index),
        None => Err(CollabError::invalid_state("File not open for read/write access")),
    }
}

/// A delete may go ahead only when every open session belongs to `user` and is read-only.
pub fn check_delete(sessions: &[EditSession], user: &UserIdentity) -> Result<(), CollabError> {
    if sessions.iter().any(|session| session.user() != user) {
        return Err(CollabError::conflict("File is open by another user"));
    }
    if sessions.iter().any(|session| session.mode() == EditMode::ReadWrite) {
        return Err(CollabError::conflict("File is open for read/write access; close it first"));
    }
    Ok(())
}
