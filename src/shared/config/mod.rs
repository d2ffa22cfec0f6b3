//! Application configuration module
//!
//! Provides the server configuration and a validating builder for it.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Development-only JWT secret used when none is configured.
pub const DEFAULT_JWT_SECRET: &str = "coedit-dev-secret-change-in-production";

/// Default token lifetime: 30 days.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Directory holding one storage area per user
    pub files_root: PathBuf,
    /// Directory copied into every newly created user area
    pub template_dir: Option<PathBuf>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// TOML file of `username = "<bcrypt hash>"` entries; open login when unset
    pub users_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingValue("host"));
        }
        if self.files_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("files_root"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "token_ttl_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        if let Some(template) = &self.template_dir {
            if !template.is_dir() {
                return Err(ConfigError::InvalidValue {
                    key: "template_dir",
                    message: format!("{} is not a directory", template.display()),
                });
            }
        }
        self.socket_addr().map(|_| ())
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "host",
                message: format!("{}", e),
            })
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    files_root: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    users_file: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the storage root
    pub fn files_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.files_root = Some(root.into());
        self
    }

    /// Set the template directory for new user areas
    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the token lifetime
    pub fn token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = Some(secs);
        self
    }

    /// Require passwords from the given users file
    pub fn users_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.users_file = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: self.port.unwrap_or(3000),
            files_root: self.files_root.unwrap_or_else(default_files_root),
            template_dir: self.template_dir,
            jwt_secret: self.jwt_secret.unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            token_ttl_secs: self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            users_file: self.users_file,
        };
        config.validate()?;
        Ok(config)
    }
}

/// `<data dir>/coedit/files`, or `./files` where no data dir exists.
pub fn default_files_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("coedit").join("files"))
        .unwrap_or_else(|| PathBuf::from("files"))
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read {path}: {message}")]
    Unreadable { path: String, message: String },
}
