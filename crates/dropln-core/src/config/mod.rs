//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, JwtAlgorithm};
pub use self::database::DatabaseConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::storage::{
    ImageKitConfig, LocalStorageConfig, ObjectStoreKind, StorageConfig,
};

use crate::error::AppError;

/// Environment variable prefix for overrides (`DROPLN__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "DROPLN";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Identity provider token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Object store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default`, `config/{env}` and environment variables
    /// prefixed with `DROPLN__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration starting from an explicit base file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let base = base.trim_end_matches(".toml");
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Return a copy with secrets replaced, suitable for printing.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.database.url = database::mask_password(&copy.database.url);
        if !copy.auth.jwt_secret.is_empty() {
            copy.auth.jwt_secret = "****".to_string();
        }
        if !copy.storage.imagekit.private_key.is_empty() {
            copy.storage.imagekit.private_key = "****".to_string();
        }
        copy
    }
}
