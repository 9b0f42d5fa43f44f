//! JSON file object store for the HBNB console.
//!
//! Holds every live entity in memory, keyed by `"<Type>.<id>"`, and
//! persists the whole table as one flat JSON object.
//!
//! # Architecture
//!
//! - The store is an explicit value: open it once, pass it by reference
//! - `save` rewrites the whole document through a temp file and a rename
//! - `reload` dispatches every record through the closed [`Registry`]
//! - Keys read from disk are trusted verbatim, never recomputed
//!
//! [`Registry`]: hbnb_model::Registry

mod error;
mod file_storage;

pub use error::{StorageError, StorageResult};
pub use file_storage::{DEFAULT_PATH, FileStorage};
