/**
 * Server Initialization
 *
 * Builds the application state from the configuration and assembles the
 * router. The coordinator is created here exactly once and handed to the
 * handlers through `AppState`.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::{AuthState, IdentityProvider, OpenAuthenticator, PasswordAuthenticator};
use crate::backend::collab::CollabState;
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::backend::settings::SettingsState;
use crate::backend::storage::{FileStorage, Storage};
use crate::shared::{AppConfig, ConfigError};

/// Load the identity provider the configuration asks for.
pub async fn load_identity_provider(config: &AppConfig) -> Result<Arc<dyn IdentityProvider>, ConfigError> {
    match &config.users_file {
        Some(path) => {
            let provider = PasswordAuthenticator::load(path).await?;
            tracing::info!("Loaded {} users from {}", provider.user_count(), path.display());
            Ok(Arc::new(provider))
        }
        None => {
            tracing::warn!("AUTH_USERS_FILE not set. Any username can log in without a password.");
            Ok(Arc::new(OpenAuthenticator))
        }
    }
}

/// Assemble the application state over the given gateway and provider.
pub fn build_state(config: AppConfig, storage: Arc<dyn Storage>, provider: Arc<dyn IdentityProvider>) -> AppState {
    let auth = AuthState::new(provider, config.jwt_secret.as_str(), config.token_ttl_secs);
    AppState {
        collab: CollabState::new(storage),
        auth,
        settings: SettingsState::new(),
        config: Arc::new(config),
    }
}

/// Create the application router with disk storage.
pub async fn create_app(config: AppConfig) -> Result<Router, ConfigError> {
    tracing::info!("Initializing coedit backend server");

    let provider = load_identity_provider(&config).await?;
    let storage = FileStorage::new(config.files_root.clone(), config.template_dir.clone());
    tracing::info!("Storing files under {}", storage.root().display());

    let app_state = build_state(config, Arc::new(storage), provider);
    Ok(create_router(app_state))
}
