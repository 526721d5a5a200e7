use crate::{
    error::Result,
    storage::{validate_name, KeyValueStore},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory key-value storage, for tests and embedders without a filesystem
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<(String, String), String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        validate_name("namespace", namespace)?;
        validate_name("key", key)?;
        let values = self.values.read().await;
        Ok(values
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    async fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        validate_name("namespace", namespace)?;
        validate_name("key", key)?;
        self.values
            .write()
            .await
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        validate_name("namespace", namespace)?;
        validate_name("key", key)?;
        self.values
            .write()
            .await
            .remove(&(namespace.to_string(), key.to_string()));
        Ok(())
    }
}
