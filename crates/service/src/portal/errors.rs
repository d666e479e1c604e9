use thiserror::Error;

use models::errors::ModelError;

use crate::errors::StorageError;

/// Business errors for portal workflows. Every variant aborts the triggering action and
/// leaves the stored document unchanged.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("already applied")]
    AlreadyApplied,
    #[error("login required")]
    NotAuthenticated,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl PortalError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PortalError::Validation(_) => 1001,
            PortalError::DuplicateEmail => 1002,
            PortalError::InvalidCredentials => 1003,
            PortalError::AlreadyApplied => 1004,
            PortalError::NotAuthenticated => 1005,
            PortalError::Forbidden(_) => 1006,
            PortalError::NotFound(_) => 1007,
            PortalError::Storage(_) => 1200,
        }
    }

    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }
}

impl From<ModelError> for PortalError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => PortalError::Validation(msg),
        }
    }
}
