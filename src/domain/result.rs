//! Result type alias for store operations

use super::errors::StoreError;

/// Result type alias using `StoreError` as the error type
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use imagestore::domain::result::Result;
/// use imagestore::domain::errors::StoreError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(StoreError::Transport("connection reset".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, StoreError>;
