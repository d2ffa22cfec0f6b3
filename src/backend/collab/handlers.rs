/**
 * File and Edit Handlers
 *
 * HTTP front of the file-session coordinator:
 * - GET /file/list[/{*path}] - directory listing
 * - GET /file/at/{*path}?mode=r|rw - open a file and return its bytes
 * - PUT /file/at/{*path}?lastEdit=N - save the whole file
 * - DELETE /file/at/{*path} - delete a file
 * - POST /file/close/{*path} - close the caller's session
 * - GET /file/listopen - the caller's open files by project
 * - GET /edit/list/{*path}, GET /edit/recent/{index}/{*path},
 *   GET /edit/sincesave/{*path} - read the caller's edit log
 * - PUT /edit/at/{*path} - buffer one operation or an array of them
 * - POST /edit/reset[/{*path}] - clear edit logs without closing sessions
 *
 * A path starting with `~name/` addresses user `name`'s area; any other path
 * is relative to the caller's own area. Other users may only open, close and
 * edit through sessions; saving, deleting and listing stay with the owner.
 *
 * Coordinator workflows block on the registry mutex, so they run on the
 * blocking thread pool.
 */

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::backend::auth::provider::is_valid_username;
use crate::backend::collab::state::{CollabState, OpenFiles};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::{normalize_path, CollabError, EditMode, EditOperation, FileHandle, UserIdentity};

/// Query of GET /file/at
#[derive(Debug, Default, Deserialize)]
pub struct OpenParams {
    pub mode: Option<String>,
}

/// Query of PUT /file/at
#[derive(Debug, Default, Deserialize)]
pub struct SaveParams {
    #[serde(rename = "lastEdit")]
    pub last_edit: Option<String>,
}

/// Split a request path into the owning user and the path inside their area.
fn split_owner(user: &UserIdentity, raw: &str) -> Result<(UserIdentity, String), CollabError> {
    let raw = raw.trim_start_matches('/');
    match raw.strip_prefix('~') {
        Some(rest) => {
            let (owner, path) = rest.split_once('/').unwrap_or((rest, ""));
            if !is_valid_username(owner) {
                return Err(CollabError::validation("path", format!("'{}' is not a valid user", owner)));
            }
            Ok((UserIdentity::new(owner), path.to_string()))
        }
        None => Ok((user.clone(), raw.to_string())),
    }
}

/// Resolve a request path to a file handle.
pub fn resolve_file(user: &UserIdentity, raw: &str) -> Result<FileHandle, CollabError> {
    let (owner, path) = split_owner(user, raw)?;
    FileHandle::new(owner, &path)
}

/// Resolve a request path to (owner, canonical directory); the area root is "".
pub fn resolve_dir(user: &UserIdentity, raw: &str) -> Result<(UserIdentity, String), CollabError> {
    let (owner, path) = split_owner(user, raw)?;
    let path = normalize_path(&path)
        .ok_or_else(|| CollabError::validation("path", format!("path '{}' escapes the storage area", path)))?;
    Ok((owner, path))
}

/// Owner-only variant of [`resolve_file`]; another user's file looks missing.
pub fn resolve_owned_file(user: &UserIdentity, raw: &str) -> Result<FileHandle, CollabError> {
    let file = resolve_file(user, raw)?;
    if file.owner() != user {
        tracing::warn!("[Collab] {} tried to change {}", user, file);
        return Err(CollabError::not_found(format!("File not found: {}", raw)));
    }
    Ok(file)
}

/// Owner-only variant of [`resolve_dir`].
pub fn resolve_owned_dir(user: &UserIdentity, raw: &str) -> Result<String, CollabError> {
    let (owner, dir) = resolve_dir(user, raw)?;
    if &owner != user {
        tracing::warn!("[Collab] {} tried to list ~{}/{}", user, owner, dir);
        return Err(CollabError::not_found(format!("Directory not found: {}", raw)));
    }
    Ok(dir)
}

fn parse_last_edit(raw: Option<&str>) -> Result<Option<i64>, CollabError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| CollabError::validation("lastEdit", format!("'{}' is not an edit index", value)))
    })
    .transpose()
}

/// Run a coordinator workflow on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T, BackendError>
where
    F: FnOnce() -> Result<T, CollabError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}

pub async fn list_root(state: State<CollabState>, user: AuthUser) -> Result<Json<Vec<String>>, BackendError> {
    list_files(state, user, Path(String::new())).await
}

pub async fn list_files(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<Json<Vec<String>>, BackendError> {
    let owner = user.identity().clone();
    let dir = resolve_owned_dir(&owner, &path)?;
    let entries = blocking(move || Ok(collab.storage().list(&owner, &dir)?)).await?;
    Ok(Json(entries.iter().map(|entry| entry.display_name()).collect()))
}

pub async fn get_file(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
    Query(params): Query<OpenParams>,
) -> Result<Vec<u8>, BackendError> {
    let user = user.identity().clone();
    let file = resolve_file(&user, &path)?;
    let mode = params
        .mode
        .as_deref()
        .map(EditMode::from_str)
        .transpose()?
        .unwrap_or(EditMode::ReadWrite);

    let opened = blocking(move || collab.open_file(&user, &file, mode)).await?;
    Ok(opened.contents)
}

pub async fn put_file(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
    Query(params): Query<SaveParams>,
    body: Bytes,
) -> Result<StatusCode, BackendError> {
    let user = user.identity().clone();
    let file = resolve_owned_file(&user, &path)?;
    let last_edit = parse_last_edit(params.last_edit.as_deref())?;

    blocking(move || collab.save_file(&user, &file, &body, last_edit)).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_file(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<StatusCode, BackendError> {
    let user = user.identity().clone();
    let file = resolve_owned_file(&user, &path)?;

    blocking(move || collab.delete_file(&user, &file)).await?;
    Ok(StatusCode::OK)
}

pub async fn close_file(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<StatusCode, BackendError> {
    let user = user.identity().clone();
    let file = resolve_file(&user, &path)?;

    blocking(move || Ok(collab.close_file(&user, &file))).await?;
    Ok(StatusCode::OK)
}

pub async fn list_open(State(collab): State<CollabState>, user: AuthUser) -> Result<Json<OpenFiles>, BackendError> {
    let user = user.identity().clone();
    Ok(Json(blocking(move || Ok(collab.list_open(&user))).await?))
}

pub async fn list_edits(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<Json<Vec<EditOperation>>, BackendError> {
    let user = user.identity().clone();
    let file = resolve_file(&user, &path)?;
    Ok(Json(blocking(move || Ok(collab.edits(&user, &file))).await?))
}

pub async fn list_recent_edits(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path((index, path)): Path<(String, String)>,
) -> Result<Json<Vec<EditOperation>>, BackendError> {
    let user = user.identity().clone();
    let file = resolve_file(&user, &path)?;
    let index = index
        .parse::<usize>()
        .map_err(|_| CollabError::validation("index", format!("'{}' is not an edit index", index)))?;

    Ok(Json(blocking(move || collab.edits_since(&user, &file, index)).await?))
}

pub async fn list_edits_since_save(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<Json<Vec<EditOperation>>, BackendError> {
    let user = user.identity().clone();
    let file = resolve_file(&user, &path)?;
    Ok(Json(blocking(move || Ok(collab.edits_since_last_save(&user, &file))).await?))
}

pub async fn put_edits(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
    body: Bytes,
) -> Result<StatusCode, BackendError> {
    let user = user.identity().clone();
    let file = resolve_file(&user, &path)?;
    let ops = EditOperation::parse_batch(&body)?;

    blocking(move || collab.append_edits(&user, &file, ops)).await?;
    Ok(StatusCode::OK)
}

pub async fn reset_all_edits(State(collab): State<CollabState>, user: AuthUser) -> Result<StatusCode, BackendError> {
    tracing::info!("[Collab] {} reset every edit log", user.identity());
    blocking(move || {
        collab.reset_all_edits();
        Ok(())
    })
    .await?;
    Ok(StatusCode::OK)
}

pub async fn reset_edits(
    State(collab): State<CollabState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<StatusCode, BackendError> {
    let file = resolve_file(user.identity(), &path)?;
    blocking(move || {
        collab.reset_edits(&file);
        Ok(())
    })
    .await?;
    Ok(StatusCode::OK)
}
