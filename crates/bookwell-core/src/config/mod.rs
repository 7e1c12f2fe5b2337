//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate,
//! overlaid with `BOOKWELL__SECTION__KEY` environment variables.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, an optional `config/{env}.toml` overlay,
    /// and environment variables prefixed with `BOOKWELL`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BOOKWELL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be positive",
            ));
        }
        match self.database.backend.as_str() {
            "memory" => {}
            "postgres" if self.database.url.is_empty() => {
                return Err(AppError::configuration(
                    "database.url is required for the postgres backend",
                ));
            }
            "postgres" if self.auth.jwt_secret == auth::PLACEHOLDER_JWT_SECRET => {
                return Err(AppError::configuration(
                    "auth.jwt_secret must be changed from the default for the postgres backend",
                ));
            }
            "postgres" => {}
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown database backend: {other}"
                )));
            }
        }
        Ok(())
    }
}
