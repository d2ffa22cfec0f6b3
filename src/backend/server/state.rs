/**
 * Application State Management
 *
 * `AppState` is the central state container handed to every handler. It is
 * built once at startup and cloned per request; every field is a cheap
 * handle onto shared state.
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State(collab): State<CollabState>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::AuthState;
use crate::backend::collab::CollabState;
use crate::backend::settings::SettingsState;
use crate::shared::AppConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    /// File-session coordinator and storage gateway
    pub collab: CollabState,

    /// Identity provider, token settings and revoked tokens
    pub auth: AuthState,

    /// Per-user settings
    pub settings: SettingsState,

    /// Configuration the server was started with
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for CollabState {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.collab.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.settings.clone()
    }
}
