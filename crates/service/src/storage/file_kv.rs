use std::{collections::HashMap, path::PathBuf, sync::Arc};
use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::StorageError;
use crate::storage::KvBackend;

/// JSON file-backed key-value store.
///
/// Keeps a `key -> raw string` map in memory and rewrites the whole file on every change.
/// The in-memory map only takes a change once the file write has succeeded.
#[derive(Clone)]
pub struct FileKvStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
    file_path: PathBuf,
}

impl FileKvStore {
    /// Open the store at `path`. Creates the file with an empty map if missing; an
    /// unparsable file is read as empty and overwritten on the next write.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StorageError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "kv file unreadable, starting empty");
                HashMap::new()
            }),
            Err(_) => {
                let empty: HashMap<String, String> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty)?).await?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn persist(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(map)?;
        fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl KvBackend for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        next.insert(key.to_string(), value);
        self.persist(&next).await?;
        *map = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(key) {
            return Ok(false);
        }
        let mut next = map.clone();
        next.remove(key);
        self.persist(&next).await?;
        *map = next;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("portal_kv_{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn file_kv_set_remove_persists() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = FileKvStore::new(&tmp).await?;

        assert_eq!(store.get("pc_user").await?, None);

        store.set("pc_site_v2", "{\"users\":[]}".to_string()).await?;
        store.set("pc_user", "{\"id\":\"id_1\"}".to_string()).await?;
        assert!(store.remove("pc_user").await?);
        assert!(!store.remove("pc_user").await?);

        // reload from disk
        let reloaded = FileKvStore::new(&tmp).await?;
        assert_eq!(reloaded.get("pc_site_v2").await?.as_deref(), Some("{\"users\":[]}"));
        assert_eq!(reloaded.get("pc_user").await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_leaves_map_unchanged() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("portal_kv_dir_{}", Uuid::new_v4()));
        let store = FileKvStore::new(dir.join("kv.json")).await?;
        store.set("pc_site_v2", "before".to_string()).await?;
        store.set("pc_user", "{\"id\":\"id_1\"}".to_string()).await?;

        // writes now fail: the parent directory is gone
        tokio::fs::remove_dir_all(&dir).await?;

        assert!(store.set("pc_site_v2", "after".to_string()).await.is_err());
        assert_eq!(store.get("pc_site_v2").await?.as_deref(), Some("before"));

        assert!(store.remove("pc_user").await.is_err());
        assert!(store.get("pc_user").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, b"not json at all").await?;

        let store = FileKvStore::new(&tmp).await?;
        assert_eq!(store.get("pc_site_v2").await?, None);

        store.set("pc_site_v2", "{}".to_string()).await?;
        let reloaded = FileKvStore::new(&tmp).await?;
        assert_eq!(reloaded.get("pc_site_v2").await?.as_deref(), Some("{}"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
