//! Core type definitions for the HBNB console.
//!
//! This crate defines the leaf types every other crate depends on:
//! - Entity identifiers (random UUID v4, treated as opaque strings)
//! - Microsecond-precision timestamps with the on-disk text format
//! - The closed set of entity type tags
//!
//! Entity behavior (attributes, records, the registry) lives in `hbnb-model`.

mod ids;
mod timestamp;
mod type_tag;

pub use ids::EntityId;
pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};
pub use type_tag::TypeTag;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown type: {0}")]
    UnknownType(String),
}
