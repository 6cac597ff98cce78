//! The record contract for stored documents
//!
//! Any type stored through the access layer must declare its identifier via
//! [`DocumentRecord::document_id`]. The identifier doubles as the partition
//! key, so every CRUD path for a record routes through the same partition.

use crate::domain::errors::StoreError;
use crate::domain::result::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Characters Cosmos DB rejects in document identifiers
///
/// The identifier is embedded in the document's addressing path, so path
/// separators and query markers are illegal.
const ILLEGAL_ID_CHARS: [char; 4] = ['/', '\\', '?', '#'];

/// Contract for application record types stored as documents
///
/// The record must be default-constructible and must expose a string-valued
/// identifier. The identifier is resolved at compile time through this
/// accessor rather than by runtime field lookup.
///
/// # Examples
///
/// ```
/// use imagestore::domain::DocumentRecord;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// struct Note {
///     id: String,
///     body: String,
/// }
///
/// impl DocumentRecord for Note {
///     fn document_id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait DocumentRecord:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// Returns the document identifier, which is also the partition key
    fn document_id(&self) -> &str;
}

/// Validates that an identifier is usable in the store's addressing scheme
///
/// # Errors
///
/// Returns `StoreError::Configuration` if the identifier is empty or contains
/// a character that is illegal in a document address.
pub fn validate_document_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(StoreError::Configuration(
            "document id cannot be empty".to_string(),
        ));
    }

    if let Some(illegal) = id.chars().find(|c| ILLEGAL_ID_CHARS.contains(c)) {
        return Err(StoreError::Configuration(format!(
            "document id '{id}' contains illegal character '{illegal}'"
        )));
    }

    Ok(())
}
