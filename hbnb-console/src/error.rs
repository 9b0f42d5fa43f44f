//! Errors reported by console commands.
//!
//! The `Display` form of each variant is the exact message printed to the
//! user; the command loop keeps running after any of them.

use hbnb_model::ModelError;
use hbnb_storage::StorageError;
use thiserror::Error;

/// Result type for console commands.
pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("** class name missing **")]
    MissingClass,

    #[error("** class doesn't exist **")]
    UnknownType(String),

    #[error("** instance id missing **")]
    MissingId,

    #[error("** no instance found **")]
    NotFound(String),

    #[error("** attribute name missing **")]
    MissingAttribute,

    #[error("** value missing **")]
    MissingValue,

    #[error("** attribute can't be updated: {0} **")]
    ReadOnlyAttribute(String),

    #[error("** invalid value: {0} **")]
    InvalidValue(String),

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    /// Persistence failed; the command did not take effect on disk.
    #[error("** storage error: {0} **")]
    Storage(#[from] StorageError),
}

impl From<ModelError> for CommandError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownType(name) => Self::UnknownType(name),
            ModelError::ReadOnlyAttribute(name) => Self::ReadOnlyAttribute(name),
            ModelError::Parse(msg) => Self::InvalidValue(msg),
        }
    }
}
