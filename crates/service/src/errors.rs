use thiserror::Error;

/// Failures of the key-value backend itself. Malformed stored data is not an error here.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}
