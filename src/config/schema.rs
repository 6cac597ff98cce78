//! Configuration schema types

use crate::config::secret::{secret_string, SecretString};
use serde::{Deserialize, Serialize};

/// Root configuration structure, mapping to the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageStoreConfig {
    /// Document store connection settings
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document store connection settings
///
/// All four identity fields are required, but they are validated only when
/// the store is first realized, not when the configuration is set. This lets
/// a caller assemble configuration in stages and retry after correcting a
/// missing field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store account endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// Store access key
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "empty_secret")]
    pub key: SecretString,

    /// Database name
    #[serde(default)]
    pub database_name: String,

    /// Collection (container) name
    #[serde(default)]
    pub collection_name: String,

    /// Provision the database and collection on first use if absent
    #[serde(default = "default_true")]
    pub provision_on_first_use: bool,
}

impl StoreConfig {
    /// Validates that every required field is present
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing field.
    pub fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.trim().is_empty() {
            return Err("store.endpoint must be configured before first use".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("store.endpoint must start with http:// or https://".to_string());
        }

        if self.key.expose_secret().is_empty() {
            return Err("store.key must be configured before first use".to_string());
        }

        if self.database_name.trim().is_empty() {
            return Err("store.database_name must be configured before first use".to_string());
        }

        if self.collection_name.trim().is_empty() {
            return Err("store.collection_name must be configured before first use".to_string());
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: empty_secret(),
            database_name: String::new(),
            collection_name: String::new(),
            provision_on_first_use: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl LoggingConfig {
    /// Parses the configured level into a tracing level
    ///
    /// This is the single source of truth for which levels are accepted;
    /// validation delegates here.
    pub fn parse_level(&self) -> Result<tracing::Level, String> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(tracing::Level::TRACE),
            "debug" => Ok(tracing::Level::DEBUG),
            "info" => Ok(tracing::Level::INFO),
            "warn" => Ok(tracing::Level::WARN),
            "error" => Ok(tracing::Level::ERROR),
            other => Err(format!(
                "Invalid logging.level '{other}'. Must be one of: trace, debug, info, warn, error"
            )),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.parse_level().map(|_| ())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "/var/log/imagestore".to_string()
}

fn default_true() -> bool {
    true
}

fn empty_secret() -> SecretString {
    secret_string(String::new())
}
