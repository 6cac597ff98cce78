//! Configuration management.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use imagestore::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("imagestore.toml")?;
//! println!("Database: {}", config.store.database_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [store]
//! endpoint = "https://your-account.documents.azure.com:443/"
//! key = "${IMAGESTORE_COSMOS_KEY}"
//! database_name = "images"
//! collection_name = "meta"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution, or the
//! `IMAGESTORE_<SECTION>_<KEY>` override pattern (for example
//! `IMAGESTORE_STORE_ENDPOINT`).
//!
//! The `[store]` section is validated only when the store is first realized;
//! see [`crate::store::DocumentStore::instance`].

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ImageStoreConfig, LoggingConfig, StoreConfig};
pub use secret::{secret_string, SecretString, SecretValue};
