//! Document store abstraction traits
//!
//! This module defines the raw CRUD contract a document client implements.
//! The record type is bound once, at the implementing client, so the verbs
//! share a single generic parameter instead of re-declaring their own.

use crate::domain::record::DocumentRecord;
use crate::domain::Result;
use async_trait::async_trait;

/// Raw CRUD and query-iteration verbs against one container
///
/// Implementations are stateless beyond the held container reference and are
/// safe for unrestricted concurrent use. No verb retries automatically; every
/// failure surfaces once to the caller.
#[async_trait]
pub trait DocumentOperations: Send + Sync {
    /// The record type stored in the container
    type Record: DocumentRecord;

    /// Create a document, keyed and partitioned by the record's identifier
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a document with the same identifier already
    /// exists, `Transport` on any other service failure.
    async fn add_item(&self, item: &Self::Record) -> Result<()>;

    /// Upsert the document at `id`
    ///
    /// Never fails due to absence of a prior document.
    async fn update_item(&self, id: &str, item: &Self::Record) -> Result<()>;

    /// Remove the document at `id`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the document is absent.
    async fn delete_item(&self, id: &str) -> Result<()>;

    /// Read the document at `id`
    ///
    /// A store-reported "not found" is a normal outcome and returns
    /// `Ok(None)`, never an error.
    async fn get_item(&self, id: &str) -> Result<Option<Self::Record>>;

    /// Run a query, draining every page before returning
    ///
    /// Takes a query in the store's native SQL-like language plus an optional
    /// single named parameter. Results keep the store's native order. A
    /// mid-iteration failure aborts the whole call; partial accumulation is
    /// never returned.
    async fn get_items(
        &self,
        query: &str,
        parameter: Option<(&str, &str)>,
    ) -> Result<Vec<Self::Record>>;
}
