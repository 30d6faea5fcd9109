//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod aws;
pub mod limits;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::aws::AwsConfig;
use self::limits::RateLimitConfig;
use self::logging::LoggingConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// AWS credentials and regions.
    #[serde(default)]
    pub aws: AwsConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Metadata table names.
    #[serde(default)]
    pub tables: TableConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Per-client rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// DynamoDB table names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table holding file metadata records, keyed by identifier.
    #[serde(default = "default_files_table")]
    pub files: String,
    /// Table holding user records, keyed by user id.
    #[serde(default = "default_users_table")]
    pub users: String,
    /// Global secondary index on the users table for email lookup.
    #[serde(default = "default_email_index")]
    pub users_email_index: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            files: default_files_table(),
            users: default_users_table(),
            users_email_index: default_email_index(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `DROPVAULT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DROPVAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_files_table() -> String {
    "Files".to_string()
}

fn default_users_table() -> String {
    "Users".to_string()
}

fn default_email_index() -> String {
    "email-index".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tables.files, "Files");
        assert_eq!(config.tables.users, "Users");
        assert_eq!(config.storage.key_prefix, "uploads");
        assert_eq!(config.storage.download_url_ttl_seconds, 300);
        assert_eq!(config.storage.upload_url_ttl_seconds, 900);
    }
}
