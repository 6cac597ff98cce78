//! Logging and observability
//!
//! Structured logging with configurable levels, console output, and optional
//! local file rotation.
//!
//! # Example
//!
//! ```no_run
//! use imagestore::logging::init_logging;
//! use imagestore::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging(&config).expect("Failed to initialize logging");
//!
//! tracing::info!("Store initialized");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
