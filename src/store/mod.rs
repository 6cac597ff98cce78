//! Document store access layer
//!
//! Two components, bottom-up:
//!
//! - [`DocumentClient`] wraps a live connection to one database/collection
//!   pair and exposes the raw CRUD and query-iteration verbs through the
//!   [`DocumentOperations`] trait.
//! - [`DocumentStore`] lazily constructs exactly one client, validates
//!   configuration at realization time, and re-exposes create/update/find
//!   operations with idempotent-create and not-found-as-absent policy.
//!
//! # Example
//!
//! ```rust,no_run
//! use imagestore::config::{secret_string, StoreConfig};
//! use imagestore::domain::ImageMetadata;
//! use imagestore::store::DocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig {
//!     endpoint: "https://account.documents.azure.com:443/".to_string(),
//!     key: secret_string("key".to_string()),
//!     database_name: "images".to_string(),
//!     collection_name: "meta".to_string(),
//!     provision_on_first_use: true,
//! };
//!
//! let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(config);
//!
//! let record = ImageMetadata::from_path("/photos/a.jpg");
//! let (created, stored) = store.create_if_not_exists(record, "a.jpg").await?;
//!
//! if let Some(found) = store.find_by_id("a.jpg").await? {
//!     println!("caption: {:?}", found.caption);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod facade;
pub mod traits;

// Re-export commonly used types
pub use client::DocumentClient;
pub use facade::DocumentStore;
pub use traits::DocumentOperations;
