//! Store facade with lazy one-shot client construction
//!
//! [`DocumentStore`] is an explicit handle meant to be created once and
//! injected into callers. It validates configuration at realization time,
//! constructs exactly one [`DocumentClient`] even under concurrent first
//! callers, and layers create/update/find policy over the raw verbs.

use crate::config::StoreConfig;
use crate::domain::record::{validate_document_id, DocumentRecord};
use crate::domain::{Result, StoreError};
use crate::store::client::DocumentClient;
use crate::store::traits::DocumentOperations;
use std::sync::{Arc, RwLock};
use tokio::sync::OnceCell;

/// Query used by [`DocumentStore::find_all`]
const SELECT_ALL_QUERY: &str = "SELECT * FROM c";

/// Single access point to one database/collection pair
///
/// Lifecycle: Unconfigured, then Configured once all fields are set, then
/// Realized on the first successful [`instance`](Self::instance) call.
/// Realization is irreversible; a failed realization leaves the store
/// unrealized so a later call can retry after the configuration is
/// corrected.
pub struct DocumentStore<T: DocumentRecord> {
    config: RwLock<StoreConfig>,
    client: OnceCell<Arc<DocumentClient<T>>>,
}

impl<T: DocumentRecord> DocumentStore<T> {
    /// Creates an unconfigured store
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config: RwLock::new(config),
            client: OnceCell::new(),
        }
    }

    /// Replaces the configuration
    ///
    /// No field is validated here; validation happens at realization time.
    /// Configuration is write-once before first use: a `configure` racing a
    /// concurrent first [`instance`](Self::instance) call may be superseded
    /// by the build already in flight.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the store is already realized; the client
    /// is never rebuilt.
    pub fn configure(&self, config: StoreConfig) -> Result<()> {
        // Hold the lock across the realization check so a replacement cannot
        // land behind a completed build.
        let mut current = self
            .config
            .write()
            .map_err(|_| StoreError::Configuration("configuration lock poisoned".to_string()))?;

        if self.client.initialized() {
            return Err(StoreError::Configuration(
                "store is already realized; configuration cannot change".to_string(),
            ));
        }

        *current = config;
        Ok(())
    }

    /// Whether the underlying client has been constructed
    pub fn is_realized(&self) -> bool {
        self.client.initialized()
    }

    /// Returns the singleton document client, constructing it on first call
    ///
    /// Concurrent first-time callers are serialized; exactly one
    /// client/provisioning sequence executes and every caller observes the
    /// same fully constructed client.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` naming the missing field if any of the four
    /// required fields is empty, `Transport` if construction or provisioning
    /// fails. Either failure leaves the store unrealized.
    pub async fn instance(&self) -> Result<Arc<DocumentClient<T>>> {
        let client = self
            .client
            .get_or_try_init(|| async {
                let config = self.snapshot_config()?;
                config.validate().map_err(StoreError::Configuration)?;

                tracing::debug!(
                    database = %config.database_name,
                    collection = %config.collection_name,
                    "Realizing document store client"
                );

                let client = DocumentClient::connect(&config).await?;
                Ok::<_, StoreError>(Arc::new(client))
            })
            .await?;

        Ok(Arc::clone(client))
    }

    /// Inserts the record under `id` unless a document already exists there
    ///
    /// Returns `(true, record)` when the record was inserted, or
    /// `(false, stored)` with the previously stored document when one already
    /// exists. The existing document is never overwritten.
    pub async fn create_if_not_exists(&self, record: T, id: &str) -> Result<(bool, T)> {
        validate_document_id(id)?;
        self.check_record_id(&record, id)?;

        let client = self.instance().await?;

        if let Some(existing) = client.get_item(id).await? {
            return Ok((false, existing));
        }

        match client.add_item(&record).await {
            Ok(()) => Ok((true, record)),
            // Lost a create race; the winner's document stands
            Err(StoreError::Conflict(_)) => match client.get_item(id).await? {
                Some(existing) => Ok((false, existing)),
                None => Err(StoreError::Conflict(format!(
                    "document '{id}' already exists"
                ))),
            },
            Err(e) => Err(e),
        }
    }

    /// Replaces (upserts) the document at `id`, returning the written record
    ///
    /// No precondition that the document pre-exists.
    pub async fn update(&self, record: T, id: &str) -> Result<T> {
        validate_document_id(id)?;
        self.check_record_id(&record, id)?;

        let client = self.instance().await?;
        client.update_item(id, &record).await?;
        Ok(record)
    }

    /// Returns the stored record for `id`, or `None` if absent
    ///
    /// Absence is a normal, expected outcome and is never surfaced as an
    /// error.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        validate_document_id(id)?;

        let client = self.instance().await?;
        client.get_item(id).await
    }

    /// Returns all documents in the collection
    pub async fn find_all(&self) -> Result<Vec<T>> {
        let client = self.instance().await?;
        client.get_items(SELECT_ALL_QUERY, None).await
    }

    /// Returns all documents matching the given query
    ///
    /// The query is passed through unmodified to the store's query engine.
    pub async fn find_matching(&self, query: &str) -> Result<Vec<T>> {
        let client = self.instance().await?;
        client.get_items(query, None).await
    }

    /// Returns all documents matching the given query with one bound
    /// named parameter
    pub async fn find_matching_with_parameter(
        &self,
        query: &str,
        parameter: &str,
        value: &str,
    ) -> Result<Vec<T>> {
        let client = self.instance().await?;
        client.get_items(query, Some((parameter, value))).await
    }

    fn snapshot_config(&self) -> Result<StoreConfig> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| StoreError::Configuration("configuration lock poisoned".to_string()))
    }

    fn check_record_id(&self, record: &T, id: &str) -> Result<()> {
        if record.document_id() != id {
            return Err(StoreError::Configuration(format!(
                "record identifier '{}' does not match requested id '{}'",
                record.document_id(),
                id
            )));
        }
        Ok(())
    }
}

impl<T: DocumentRecord> Default for DocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::ImageMetadata;

    fn valid_config() -> StoreConfig {
        StoreConfig {
            endpoint: "https://x".to_string(),
            key: secret_string("k".to_string()),
            database_name: "images".to_string(),
            collection_name: "meta".to_string(),
            // Provisioning needs a live store; client construction does not
            provision_on_first_use: false,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_instance_fails() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::new();

        let err = store.instance().await.unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(err.to_string().contains("store.endpoint"));
        assert!(!store.is_realized());
    }

    #[tokio::test]
    async fn test_instance_names_first_missing_field() {
        let cases: Vec<(StoreConfig, &str)> = vec![
            (
                StoreConfig {
                    endpoint: String::new(),
                    ..valid_config()
                },
                "store.endpoint",
            ),
            (
                StoreConfig {
                    key: secret_string(String::new()),
                    ..valid_config()
                },
                "store.key",
            ),
            (
                StoreConfig {
                    database_name: String::new(),
                    ..valid_config()
                },
                "store.database_name",
            ),
            (
                StoreConfig {
                    collection_name: String::new(),
                    ..valid_config()
                },
                "store.collection_name",
            ),
        ];

        for (config, expected) in cases {
            let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(config);
            let err = store.instance().await.unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "expected '{expected}' in '{err}'"
            );
            assert!(!store.is_realized());
        }
    }

    #[tokio::test]
    async fn test_instance_retries_after_configuration_fix() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::new();

        assert!(store.instance().await.is_err());
        assert!(!store.is_realized());

        store.configure(valid_config()).unwrap();
        assert!(store.instance().await.is_ok());
        assert!(store.is_realized());
    }

    #[tokio::test]
    async fn test_concurrent_instance_calls_observe_same_client() {
        let store: Arc<DocumentStore<ImageMetadata>> =
            Arc::new(DocumentStore::with_config(valid_config()));

        let a = Arc::clone(&store);
        let b = Arc::clone(&store);
        let (first, second) = tokio::join!(
            tokio::spawn(async move { a.instance().await }),
            tokio::spawn(async move { b.instance().await }),
        );

        let first = first.unwrap().unwrap();
        let second = second.unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.database_name(), "images");
        assert_eq!(first.collection_name(), "meta");
    }

    #[tokio::test]
    async fn test_configure_rejected_after_realization() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(valid_config());
        store.instance().await.unwrap();

        let err = store.configure(valid_config()).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(err.to_string().contains("already realized"));
    }

    #[tokio::test]
    async fn test_latest_configuration_wins_before_realization() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(valid_config());

        let mut replacement = valid_config();
        replacement.database_name = "archive".to_string();
        store.configure(replacement).unwrap();

        let client = store.instance().await.unwrap();
        assert_eq!(client.database_name(), "archive");
    }

    #[tokio::test]
    async fn test_repeated_instance_returns_cached_client() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(valid_config());

        let first = store.instance().await.unwrap();
        let second = store.instance().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_create_if_not_exists_rejects_mismatched_id() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(valid_config());
        let record = ImageMetadata::from_path("a.jpg");

        let err = store.create_if_not_exists(record, "b.jpg").await.unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        // Validation happens before realization
        assert!(!store.is_realized());
    }

    #[tokio::test]
    async fn test_update_rejects_illegal_id() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(valid_config());
        let record = ImageMetadata::from_path("photos/a.jpg");

        let err = store.update(record, "photos/a.jpg").await.unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(!store.is_realized());
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_illegal_id() {
        let store: DocumentStore<ImageMetadata> = DocumentStore::with_config(valid_config());

        let err = store.find_by_id("a/b.jpg").await.unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }
}
