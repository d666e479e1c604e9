//! Key-value backends for the portal store.
//!
//! The store only ever needs string keys mapping to raw string values, the same surface
//! browser local storage offers. Backends persist that map however they like.

pub mod file_kv;
pub mod memory_kv;

use async_trait::async_trait;

use crate::errors::StorageError;

/// Trait abstraction for a string key-value slot store.
/// Implementations can be file-backed or in-memory.
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    /// Remove a key; returns whether it existed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}
