// Imagestore - Document store access layer for image metadata
// Copyright (c) 2026 Imagestore Contributors
// Licensed under the MIT License

//! # Imagestore - Azure Cosmos DB access layer
//!
//! A generic access layer over a remote document database: it
//! creates/reads/updates/deletes documents of an arbitrary record type, keyed
//! by a string identifier that doubles as the partition key.
//!
//! ## Architecture
//!
//! - [`store`] - The core: document client, store facade, operations trait
//! - [`domain`] - Record contract, image metadata record, error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use imagestore::config::load_config;
//! use imagestore::domain::ImageMetadata;
//! use imagestore::store::DocumentStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("imagestore.toml")?;
//!     let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(config.store);
//!
//!     // The client is built and the database/collection provisioned on the
//!     // first call; later calls reuse the cached client.
//!     let mut metadata = ImageMetadata::from_path("/photos/a.jpg");
//!     metadata.add_insights(Some("a cat".to_string()), vec!["cat".to_string()]);
//!
//!     let (created, stored) = store.create_if_not_exists(metadata, "a.jpg").await?;
//!     println!("created: {created}, tags: {:?}", stored.tags);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]. A missing document on
//! read is not an error: [`store::DocumentStore::find_by_id`] returns
//! `Ok(None)` and surfaces only configuration, conflict, and transport
//! failures.
//!
//! ## Custom record types
//!
//! Any type implementing [`domain::DocumentRecord`] can be stored; the
//! declared identifier is used as both document id and partition key.

pub mod config;
pub mod domain;
pub mod logging;
pub mod store;
