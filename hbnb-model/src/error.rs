//! Error types for the entity model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or reconstructing entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Type tag is not in the registry.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A record could not be turned into an entity.
    #[error("parse error: {0}")]
    Parse(String),

    /// Attempt to overwrite an identity field through the attribute path.
    #[error("attribute is read-only: {0}")]
    ReadOnlyAttribute(String),
}

impl From<hbnb_types::Error> for ModelError {
    fn from(err: hbnb_types::Error) -> Self {
        match err {
            hbnb_types::Error::InvalidTimestamp(msg) => Self::Parse(format!("invalid timestamp: {msg}")),
            hbnb_types::Error::UnknownType(name) => Self::UnknownType(name),
        }
    }
}
