use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StorageError;
use crate::storage::KvBackend;

/// In-process key-value store for tests and throwaway runs. Nothing survives the process.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KvBackend for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}
