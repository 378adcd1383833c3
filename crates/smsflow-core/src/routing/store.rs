/// Key-value store holding route configuration
use crate::constants::{STORE_KEY_ATTRIBUTE, STORE_VALUE_ATTRIBUTE};
use crate::error::RelayError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key does not exist
    async fn get(&self, key: &str) -> Result<Option<String>, RelayError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), RelayError>;
}

/// DynamoDB-backed store: one item per key, the value kept as a string attribute
pub struct DynamoDbKeyValueStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbKeyValueStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl KeyValueStore for DynamoDbKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RelayError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(STORE_KEY_ATTRIBUTE, AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(|e| RelayError::Storage(format!("DynamoDB get_item failed: {}", e)))?;

        let Some(item) = result.item() else {
            debug!(key = key, "Key not found");
            return Ok(None);
        };

        match item.get(STORE_VALUE_ATTRIBUTE) {
            None => Ok(None),
            Some(value) => value.as_s().map(|s| Some(s.clone())).map_err(|_| {
                RelayError::RouteConfig(format!(
                    "Attribute '{}' of {} is not a string",
                    STORE_VALUE_ATTRIBUTE, key
                ))
            }),
        }
    }

    async fn ping(&self) -> Result<(), RelayError> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| RelayError::Storage(format!("DynamoDB describe_table failed: {}", e)))?;
        Ok(())
    }
}

/// In-memory store for tests and local runs
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub async fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RelayError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn ping(&self) -> Result<(), RelayError> {
        Ok(())
    }
}
