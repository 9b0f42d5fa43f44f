//! Error types for the storage layer.

use hbnb_model::ModelError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while encoding the document.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted document or one of its records is malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Persisted record names a type that is not registered.
    #[error("unknown type in persisted record: {0}")]
    UnknownType(String),

    /// Entity not found.
    #[error("entity not found: {0}")]
    NotFound(String),
}

impl From<ModelError> for StorageError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownType(name) => Self::UnknownType(name),
            ModelError::Parse(msg) => Self::Parse(msg),
            ModelError::ReadOnlyAttribute(name) => {
                Self::Parse(format!("read-only attribute in record: {name}"))
            }
        }
    }
}
