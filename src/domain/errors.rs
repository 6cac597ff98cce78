//! Domain error types
//!
//! This module defines the error taxonomy for the store. All errors are
//! domain-specific and don't expose Azure SDK types.

use thiserror::Error;

/// Main store error type
///
/// This is the primary error type used throughout the crate. Read operations
/// never produce `NotFound`; a missing document on read is reported as an
/// absent value instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or invalid setup field; retryable after the configuration is
    /// corrected
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Identifier collision on create
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Explicit absence, raised only by delete-on-absent
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Network or service-side failure other than not-found
    #[error("Transport error: {0}")]
    Transport(String),

    /// Failed to decode a response body
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether the caller may retry the same call after fixing its inputs
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Configuration(_))
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Configuration("endpoint must be configured".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: endpoint must be configured"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::NotFound("a.jpg".to_string());
        assert_eq!(err.to_string(), "Document not found: a.jpg");
    }

    #[test]
    fn test_configuration_is_retryable() {
        assert!(StoreError::Configuration("missing key".to_string()).is_retryable());
        assert!(!StoreError::Transport("connection reset".to_string()).is_retryable());
        assert!(!StoreError::Conflict("a.jpg".to_string()).is_retryable());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: StoreError = toml_err.into();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_store_error_implements_std_error() {
        let err = StoreError::Transport("test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
