/**
 * Settings Handlers
 *
 * - GET /settings - every setting of the caller, as a JSON object
 * - GET /settings/{key} - one setting as a JSON string, 404 if unset
 * - POST /settings - store url-encoded `k=v&k2=v2` pairs
 * - DELETE /settings/{key} - remove one setting; removing an unset key is a no-op
 */

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::Json,
    Form,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::settings::state::SettingsState;
use crate::shared::CollabError;

/// Setting names must be non-empty; values may be.
fn check_names(pairs: &[(String, String)]) -> Result<(), CollabError> {
    if pairs.iter().any(|(key, _)| key.is_empty()) {
        return Err(CollabError::validation("body", "setting names can't be empty"));
    }
    Ok(())
}

pub async fn list_settings(
    State(settings): State<SettingsState>,
    user: AuthUser,
) -> Json<BTreeMap<String, String>> {
    Json(settings.all(user.identity()).await)
}

pub async fn get_setting(
    State(settings): State<SettingsState>,
    user: AuthUser,
    Path(key): Path<String>,
) -> Result<Json<String>, BackendError> {
    settings
        .get(user.identity(), &key)
        .await
        .map(Json)
        .ok_or_else(|| CollabError::not_found(format!("{} not found", key)).into())
}

pub async fn save_settings(
    State(settings): State<SettingsState>,
    user: AuthUser,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<StatusCode, BackendError> {
    let Form(pairs) = form.map_err(|rejection| CollabError::validation("body", rejection.body_text()))?;
    check_names(&pairs)?;

    tracing::info!("{} saved {} settings", user.identity(), pairs.len());
    settings.update(user.identity(), pairs).await;
    Ok(StatusCode::OK)
}

pub async fn delete_setting(
    State(settings): State<SettingsState>,
    user: AuthUser,
    Path(key): Path<String>,
) -> StatusCode {
    if !settings.remove(user.identity(), &key).await {
        tracing::debug!("{} deleted unset setting {}", user.identity(), key);
    }
    StatusCode::OK
}
