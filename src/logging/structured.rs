//! Structured logging setup using tracing
//!
//! Console output is always enabled; an optional rolling file appender is
//! added when local file logging is configured.

use crate::config::LoggingConfig;
use crate::domain::errors::StoreError;
use crate::domain::result::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
#[derive(Debug)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system based on configuration
///
/// # Returns
///
/// A `LoggingGuard` that must be kept alive for the duration of the program.
///
/// # Errors
///
/// Returns an error if the configured log level is invalid.
///
/// # Example
///
/// ```no_run
/// use imagestore::logging::init_logging;
/// use imagestore::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging(&config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = config.parse_level().map_err(StoreError::Configuration)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("imagestore={log_level}")));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .boxed();

    let mut layers = vec![console_layer];
    let mut file_guard = None;

    if config.local_enabled {
        let appender = RollingFileAppender::new(Rotation::DAILY, &config.local_path, "imagestore.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .boxed();
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .init();

    Ok(LoggingGuard::new(file_guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Initializing a valid subscriber is global and can only happen once per
    // process, so only the rejection path is exercised here.
    #[test]
    fn test_init_logging_rejects_invalid_level() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..LoggingConfig::default()
        };

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(err.to_string().contains("logging.level"));
    }
}
