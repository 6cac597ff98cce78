//! Domain models and types.
//!
//! This module contains the record contract, the sample image metadata
//! record, and the error taxonomy for the store.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The record contract** ([`DocumentRecord`]) every stored type implements
//! - **Identifier validation** ([`record::validate_document_id`])
//! - **A concrete record** ([`ImageMetadata`]) for image analysis output
//! - **Error types** ([`StoreError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```
//! use imagestore::domain::Result;
//!
//! fn example(id: &str) -> Result<()> {
//!     imagestore::domain::record::validate_document_id(id)?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod metadata;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::StoreError;
pub use metadata::ImageMetadata;
pub use record::DocumentRecord;
pub use result::Result;
