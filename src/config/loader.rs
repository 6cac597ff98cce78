//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ImageStoreConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::StoreError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ImageStoreConfig
/// 4. Applies environment variable overrides (IMAGESTORE_* prefix)
/// 5. Validates the logging section
///
/// The store section is deliberately NOT validated here. Its fields are
/// checked when the store is first realized, so a partially configured file
/// still loads and the missing fields can be supplied later.
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or the logging section is
/// invalid.
///
/// # Examples
///
/// ```no_run
/// use imagestore::config::load_config;
///
/// let config = load_config("imagestore.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ImageStoreConfig> {
    let path = path.as_ref();

    // Pick up a local .env if present
    dotenvy::dotenv().ok();

    if !path.exists() {
        return Err(StoreError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StoreError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ImageStoreConfig = toml::from_str(&contents)
        .map_err(|e| StoreError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .logging
        .validate()
        .map_err(StoreError::Configuration)?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(StoreError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the IMAGESTORE_* prefix
///
/// Environment variables follow the pattern: IMAGESTORE_<SECTION>_<KEY>
/// For example: IMAGESTORE_STORE_ENDPOINT, IMAGESTORE_LOGGING_LEVEL
fn apply_env_overrides(config: &mut ImageStoreConfig) {
    // Store overrides
    if let Ok(val) = std::env::var("IMAGESTORE_STORE_ENDPOINT") {
        config.store.endpoint = val;
    }
    if let Ok(val) = std::env::var("IMAGESTORE_STORE_KEY") {
        config.store.key = secret_string(val);
    }
    if let Ok(val) = std::env::var("IMAGESTORE_STORE_DATABASE_NAME") {
        config.store.database_name = val;
    }
    if let Ok(val) = std::env::var("IMAGESTORE_STORE_COLLECTION_NAME") {
        config.store.collection_name = val;
    }
    if let Ok(val) = std::env::var("IMAGESTORE_STORE_PROVISION_ON_FIRST_USE") {
        config.store.provision_on_first_use = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("IMAGESTORE_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("IMAGESTORE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("IMAGESTORE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
