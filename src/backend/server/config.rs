/**
 * Server Configuration Loading
 *
 * Reads the server configuration from environment variables (which `main`
 * may have seeded from a `.env` file):
 *
 * - `SERVER_HOST` - bind address (default `0.0.0.0`)
 * - `SERVER_PORT` - bind port (default `3000`)
 * - `FILES_ROOT` - root of the per-user storage areas
 * - `TEMPLATE_DIR` - copied into every new user area
 * - `JWT_SECRET` - token signing secret
 * - `TOKEN_TTL_SECS` - token lifetime
 * - `AUTH_USERS_FILE` - TOML users file; open login when unset
 */

use std::env;
use std::str::FromStr;

use crate::shared::{AppConfig, ConfigError};

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("'{}': {}", value, e),
            })
        })
        .transpose()
}

/// Build the configuration from the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut builder = AppConfig::builder();

    if let Some(host) = var("SERVER_HOST") {
        builder = builder.host(host);
    }
    if let Some(port) = parse_var::<u16>("SERVER_PORT")? {
        builder = builder.port(port);
    }
    if let Some(root) = var("FILES_ROOT") {
        builder = builder.files_root(root);
    }
    if let Some(template) = var("TEMPLATE_DIR") {
        builder = builder.template_dir(template);
    }
    match var("JWT_SECRET") {
        Some(secret) => builder = builder.jwt_secret(secret),
        None => tracing::warn!("JWT_SECRET not set. Using the development secret."),
    }
    if let Some(ttl) = parse_var::<u64>("TOKEN_TTL_SECS")? {
        builder = builder.token_ttl_secs(ttl);
    }
    if let Some(users) = var("AUTH_USERS_FILE") {
        builder = builder.users_file(users);
    }

    builder.build()
}
