use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use models::document::Document;
use models::ids::UserId;
use models::session::SessionPointer;

use crate::errors::StorageError;
use crate::seed::seed_document;
use crate::storage::KvBackend;

/// Storage slots used by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreKeys {
    /// Slot holding the serialized document. The key doubles as the schema version tag.
    pub document: String,
    /// Slot holding the session pointer.
    pub session: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self { document: "pc_site_v2".into(), session: "pc_user".into() }
    }
}

/// Owns the canonical portal document inside a key-value backend.
///
/// Every mutation is a whole-document read, an in-memory change and a whole-document write.
/// A store-wide mutex keeps those sequences from interleaving within one process.
pub struct DocumentStore {
    backend: Arc<dyn KvBackend>,
    keys: StoreKeys,
    lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn KvBackend>, keys: StoreKeys) -> Self {
        Self { backend, keys, lock: Mutex::new(()) }
    }

    /// Store over `backend` using the default slot keys.
    pub fn with_backend(backend: Arc<dyn KvBackend>) -> Self {
        Self::new(backend, StoreKeys::default())
    }

    pub fn keys(&self) -> &StoreKeys {
        &self.keys
    }

    async fn read_document(&self) -> Result<Option<Document>, StorageError> {
        let Some(raw) = self.backend.get(&self.keys.document).await? else {
            return Ok(None);
        };
        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.keys.document, error = %e, "stored document is not valid JSON, treating as absent");
                return Ok(None);
            }
        };
        let Some(decoded) = Document::from_value_lenient(value) else {
            warn!(key = %self.keys.document, "stored document is not a JSON object, treating as absent");
            return Ok(None);
        };
        for entry in &decoded.skipped {
            warn!(key = %self.keys.document, entry = %entry, "skipping malformed document entry");
        }
        Ok(Some(decoded.document))
    }

    async fn write_document(&self, doc: &Document) -> Result<(), StorageError> {
        let raw = serde_json::to_string(doc)?;
        self.backend.set(&self.keys.document, raw).await
    }

    async fn read_or_seed(&self) -> Result<Document, StorageError> {
        if let Some(doc) = self.read_document().await? {
            return Ok(doc);
        }
        let doc = seed_document(Utc::now());
        self.write_document(&doc).await?;
        info!(key = %self.keys.document, users = doc.users.len(), jobs = doc.jobs.len(), "store_seeded");
        Ok(doc)
    }

    /// Read the stored document. Absent data, invalid JSON or a non-object yields `None`;
    /// entries that don't fit their collection are dropped rather than discarding the rest.
    pub async fn load(&self) -> Result<Option<Document>, StorageError> {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    /// Overwrite the stored document unconditionally.
    pub async fn save(&self, doc: &Document) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.write_document(doc).await
    }

    /// Persist the seed document if no readable document exists. Returns whether it seeded.
    pub async fn ensure_defaults(&self) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().await;
        if self.read_document().await?.is_some() {
            return Ok(false);
        }
        self.read_or_seed().await?;
        Ok(true)
    }

    /// Current document, seeding first if none is readable.
    pub async fn snapshot(&self) -> Result<Document, StorageError> {
        let _guard = self.lock.lock().await;
        self.read_or_seed().await
    }

    /// Apply `f` to the current document and persist the result.
    ///
    /// Nothing is written when `f` fails, so a rejected operation leaves storage untouched.
    pub async fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<StorageError>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_or_seed().await?;
        let out = f(&mut doc)?;
        self.write_document(&doc).await?;
        Ok(out)
    }

    /// Point the session slot at `user_id`.
    pub async fn set_session(&self, user_id: &UserId) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&SessionPointer { id: user_id.clone() })?;
        self.backend.set(&self.keys.session, raw).await
    }

    /// Id in the session slot, if any. A malformed pointer reads as no session.
    pub async fn session_user_id(&self) -> Result<Option<UserId>, StorageError> {
        let Some(raw) = self.backend.get(&self.keys.session).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<SessionPointer>(&raw) {
            Ok(pointer) => Ok(Some(pointer.id)),
            Err(e) => {
                debug!(key = %self.keys.session, error = %e, "ignoring malformed session pointer");
                Ok(None)
            }
        }
    }

    pub async fn clear_session(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.keys.session).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_kv::MemoryKvStore;

    fn store_with(backend: Arc<MemoryKvStore>) -> DocumentStore {
        DocumentStore::with_backend(backend)
    }

    #[tokio::test]
    async fn ensure_defaults_is_idempotent() -> Result<(), anyhow::Error> {
        let store = store_with(Arc::new(MemoryKvStore::default()));

        assert!(store.load().await?.is_none());
        assert!(store.ensure_defaults().await?);
        let first = store.load().await?.expect("seeded");

        assert!(!store.ensure_defaults().await?);
        let second = store.load().await?.expect("still seeded");
        assert_eq!(first, second);
        assert_eq!(second.users.len(), 3);
        assert_eq!(second.jobs.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_document_is_reseeded() -> Result<(), anyhow::Error> {
        let backend = Arc::new(MemoryKvStore::default());
        backend.set("pc_site_v2", "{\"users\": [".to_string()).await?;
        let store = store_with(backend);

        assert!(store.load().await?.is_none());
        assert!(store.ensure_defaults().await?);
        assert_eq!(store.load().await?.map(|d| d.users.len()), Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn odd_field_values_do_not_trigger_reseed() -> Result<(), anyhow::Error> {
        let backend = Arc::new(MemoryKvStore::default());
        let raw = r#"{
            "users": [
                {"id":"id_k","role":"Student","name":"Keep Me","email":"keep@x.com","password":"pw","year":3},
                {"id":"id_x","role":"Recruiter","name":"Odd One","email":"odd@x.com","password":"pw"}
            ],
            "jobs": [
                {"id":"id_j","companyId":"id_c","title":"Tutor","desc":"","type":"Internship",
                 "ctc":1500.5,"createdAt":"2024-07-01T10:00:00Z"}
            ],
            "applications": []
        }"#;
        backend.set("pc_site_v2", raw.to_string()).await?;
        let store = store_with(backend);

        assert!(!store.ensure_defaults().await?);
        let doc = store.snapshot().await?;
        let names: Vec<_> = doc.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Keep Me"]);
        assert_eq!(doc.jobs.len(), 1);
        assert_eq!(doc.jobs[0].ctc, 1500.5);
        Ok(())
    }

    #[tokio::test]
    async fn existing_document_is_left_alone_whatever_it_holds() -> Result<(), anyhow::Error> {
        let backend = Arc::new(MemoryKvStore::default());
        backend.set("pc_site_v2", "{\"users\":[],\"jobs\":[],\"applications\":[]}".to_string()).await?;
        let store = store_with(backend);

        assert!(!store.ensure_defaults().await?);
        assert_eq!(store.snapshot().await?, Document::default());
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_writes_nothing() -> Result<(), anyhow::Error> {
        let store = store_with(Arc::new(MemoryKvStore::default()));
        store.ensure_defaults().await?;
        let before = store.snapshot().await?;

        let res: Result<(), StorageError> = store
            .update(|doc| {
                doc.users.clear();
                Err(StorageError::Io("rejected".into()))
            })
            .await;
        assert!(res.is_err());
        assert_eq!(store.snapshot().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn session_slot_roundtrip_and_malformed_pointer() -> Result<(), anyhow::Error> {
        let backend = Arc::new(MemoryKvStore::default());
        let store = store_with(backend.clone());
        let id = UserId::generate();

        assert_eq!(store.session_user_id().await?, None);
        store.set_session(&id).await?;
        assert_eq!(backend.get("pc_user").await?, Some(format!("{{\"id\":\"{id}\"}}")));
        assert_eq!(store.session_user_id().await?, Some(id));

        store.clear_session().await?;
        assert_eq!(store.session_user_id().await?, None);

        backend.set("pc_user", "garbage".to_string()).await?;
        assert_eq!(store.session_user_id().await?, None);
        Ok(())
    }
}
