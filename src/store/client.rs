//! Document client for Azure Cosmos DB
//!
//! Direct mapping of the CRUD verbs onto the store's wire operations for one
//! database/collection pair. The one error-mapping rule that matters here:
//! not-found on read is data, not a fault.

use crate::config::StoreConfig;
use crate::domain::record::{validate_document_id, DocumentRecord};
use crate::domain::{Result, StoreError};
use crate::store::traits::DocumentOperations;
use async_trait::async_trait;
use azure_core::credentials::Secret;
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::models::{
    ContainerProperties, IndexingPolicy, PartitionKeyDefinition, PartitionKeyKind,
};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions, PartitionKey, Query};
use futures::stream::StreamExt;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Partition key path declared on provisioned collections
///
/// Every record's identifier is also its partition key, so the path is fixed.
const PARTITION_KEY_PATH: &str = "/id";

/// Checks whether a service error message reports a missing document
fn is_not_found_message(message: &str) -> bool {
    message.contains("404") || message.contains("NotFound")
}

/// Checks whether a service error message reports an identifier collision
fn is_conflict_message(message: &str) -> bool {
    message.contains("409") || message.contains("Conflict")
}

/// Client for one provisioned database/collection pair
///
/// The record type is bound once here; every verb operates on the same type.
/// The client holds only the container reference and is safe to share across
/// tasks once built.
pub struct DocumentClient<T: DocumentRecord> {
    container: ContainerClient,
    database_name: String,
    collection_name: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: DocumentRecord> DocumentClient<T> {
    /// Connect to the configured database/collection pair
    ///
    /// When `provision_on_first_use` is set, the database and collection are
    /// created if absent, declaring the identifier field as the partition key
    /// path. Provisioning is idempotent.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the client cannot be created or provisioning
    /// fails. The caller is expected to have validated the configuration.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        use secrecy::ExposeSecret;

        // Convert our SecretString to Azure's Secret type
        let key_str: String = config.key.expose_secret().clone().into();
        let key = Secret::new(key_str);
        let options = Some(CosmosClientOptions::default());

        let client = CosmosClient::with_key(&config.endpoint, key, options).map_err(|e| {
            StoreError::Transport(format!("Failed to create store client: {e}"))
        })?;

        let database = client.database_client(&config.database_name);

        if config.provision_on_first_use {
            ensure_database_exists(&client, &database, &config.database_name).await?;
            ensure_collection_exists(&database, &config.collection_name).await?;
        }

        let container = database.container_client(&config.collection_name);

        Ok(Self {
            container,
            database_name: config.database_name.clone(),
            collection_name: config.collection_name.clone(),
            _record: PhantomData,
        })
    }

    /// Get the database name
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Get the collection name
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }
}

// Manual impl: the container handle has no Debug and carries nothing worth
// printing anyway.
impl<T: DocumentRecord> fmt::Debug for DocumentClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentClient")
            .field("database_name", &self.database_name)
            .field("collection_name", &self.collection_name)
            .finish_non_exhaustive()
    }
}

/// Ensure the database exists, creating it if necessary
async fn ensure_database_exists(
    client: &CosmosClient,
    database: &DatabaseClient,
    database_name: &str,
) -> Result<()> {
    // Try to read the database first
    match database.read(None).await {
        Ok(_) => {
            tracing::info!(database = %database_name, "Database already exists");
            Ok(())
        }
        Err(_) => {
            tracing::info!(database = %database_name, "Creating database");

            client.create_database(database_name, None).await.map_err(|e| {
                StoreError::Transport(format!("Failed to create database {database_name}: {e}"))
            })?;

            tracing::info!(database = %database_name, "Database created successfully");
            Ok(())
        }
    }
}

/// Ensure the collection exists, creating it with the identifier partition
/// key path if necessary
async fn ensure_collection_exists(database: &DatabaseClient, collection_name: &str) -> Result<()> {
    let container = database.container_client(collection_name);

    // Try to read the container first
    match container.read(None).await {
        Ok(_) => {
            tracing::info!(collection = %collection_name, "Collection already exists");
            Ok(())
        }
        Err(_) => {
            tracing::info!(collection = %collection_name, "Creating collection");

            let partition_key_def = PartitionKeyDefinition {
                paths: vec![PARTITION_KEY_PATH.to_string()],
                kind: PartitionKeyKind::Hash,
                version: None,
            };

            let properties = ContainerProperties {
                id: Cow::Owned(collection_name.to_string()),
                partition_key: partition_key_def,
                indexing_policy: Some(IndexingPolicy::default()),
                ..Default::default()
            };

            database.create_container(properties, None).await.map_err(|e| {
                StoreError::Transport(format!(
                    "Failed to create collection {collection_name}: {e}"
                ))
            })?;

            tracing::info!(collection = %collection_name, "Collection created successfully");
            Ok(())
        }
    }
}

#[async_trait]
impl<T: DocumentRecord> DocumentOperations for DocumentClient<T> {
    type Record = T;

    async fn add_item(&self, item: &T) -> Result<()> {
        let id = item.document_id().to_string();
        validate_document_id(&id)?;
        let partition_key = PartitionKey::from(id.clone());

        self.container
            .create_item(partition_key, item, None)
            .await
            .map_err(|e| {
                let message = e.to_string();
                if is_conflict_message(&message) {
                    StoreError::Conflict(format!("document '{id}' already exists"))
                } else {
                    StoreError::Transport(format!("Failed to create document '{id}': {message}"))
                }
            })?;

        Ok(())
    }

    async fn update_item(&self, id: &str, item: &T) -> Result<()> {
        validate_document_id(id)?;
        let partition_key = PartitionKey::from(id.to_string());

        self.container
            .upsert_item(partition_key, item, None)
            .await
            .map_err(|e| {
                StoreError::Transport(format!("Failed to upsert document '{id}': {e}"))
            })?;

        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        validate_document_id(id)?;
        let partition_key = PartitionKey::from(id.to_string());

        self.container
            .delete_item(partition_key, id, None)
            .await
            .map_err(|e| {
                let message = e.to_string();
                if is_not_found_message(&message) {
                    StoreError::NotFound(id.to_string())
                } else {
                    StoreError::Transport(format!("Failed to delete document '{id}': {message}"))
                }
            })?;

        Ok(())
    }

    async fn get_item(&self, id: &str) -> Result<Option<T>> {
        validate_document_id(id)?;
        let partition_key = PartitionKey::from(id.to_string());

        tracing::debug!(
            collection = %self.collection_name,
            id = %id,
            "Reading document"
        );

        match self.container.read_item::<T>(partition_key, id, None).await {
            Ok(response) => {
                let item = response.into_body().map_err(|e| {
                    StoreError::Serialization(format!(
                        "Failed to deserialize document '{id}': {e}"
                    ))
                })?;
                Ok(Some(item))
            }
            Err(e) => {
                let message = e.to_string();
                if is_not_found_message(&message) {
                    Ok(None)
                } else {
                    Err(StoreError::Transport(format!(
                        "Failed to read document '{id}': {message}"
                    )))
                }
            }
        }
    }

    async fn get_items(
        &self,
        query: &str,
        parameter: Option<(&str, &str)>,
    ) -> Result<Vec<T>> {
        let mut query_def = Query::from(query.to_string());
        if let Some((name, value)) = parameter {
            query_def = query_def.with_parameter(name, value).map_err(|e| {
                StoreError::Serialization(format!(
                    "Failed to bind query parameter '{name}': {e}"
                ))
            })?;
        }

        tracing::debug!(
            collection = %self.collection_name,
            query = %query,
            "Running query"
        );

        // Empty partition key runs the query across all partitions
        let mut query_response = self
            .container
            .query_items::<T>(query_def, (), None)
            .map_err(|e| StoreError::Transport(format!("Failed to create query: {e}")))?;

        // Drain every page; any mid-iteration failure aborts the whole call
        let mut results = Vec::new();
        while let Some(item) = query_response.next().await {
            match item {
                Ok(doc) => results.push(doc),
                Err(e) => {
                    return Err(StoreError::Transport(format!(
                        "Query failed mid-iteration: {e}"
                    )));
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::ImageMetadata;

    #[tokio::test]
    async fn test_client_debug_names_pair_without_credentials() {
        let config = StoreConfig {
            endpoint: "https://x".to_string(),
            key: secret_string("super-secret".to_string()),
            database_name: "images".to_string(),
            collection_name: "meta".to_string(),
            provision_on_first_use: false,
        };

        let client: DocumentClient<ImageMetadata> =
            DocumentClient::connect(&config).await.unwrap();

        let rendered = format!("{client:?}");
        assert!(rendered.contains("images"));
        assert!(rendered.contains("meta"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_not_found_message_classification() {
        assert!(is_not_found_message("HTTP error: 404 Not Found"));
        assert!(is_not_found_message("status: NotFound"));
        assert!(!is_not_found_message("HTTP error: 500 Internal Server Error"));
    }

    #[test]
    fn test_conflict_message_classification() {
        assert!(is_conflict_message("HTTP error: 409 Conflict"));
        assert!(is_conflict_message("status: Conflict"));
        assert!(!is_conflict_message("HTTP error: 404 Not Found"));
    }

    #[test]
    fn test_partition_key_path_is_identifier() {
        assert_eq!(PARTITION_KEY_PATH, "/id");
    }
}
