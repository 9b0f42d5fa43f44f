//! Entity model for the HBNB console.
//!
//! Defines the types the object store and the console are built on:
//! - [`Entity`], a typed record (id, timestamps, open attribute map)
//! - [`Record`], the flat JSON object form an entity is persisted as
//! - [`EntitySchema`], the default attribute set each entity type declares
//! - [`Registry`], the closed mapping from type tag to [`EntityFactory`]
//! - [`AttrValue`], attribute values coerced from raw command text
//!
//! Entities are plain values: constructing one never touches the store.
//! Registration is an explicit, separate call on the store.

mod entity;
mod error;
mod registry;
mod schema;
mod value;

pub use entity::{CLASS_KEY, Entity, Record};
pub use error::{ModelError, ModelResult};
pub use registry::{EntityFactory, Registry, StandardFactory};
pub use schema::{DefaultAttribute, EntitySchema, FieldType};
pub use value::AttrValue;

pub use hbnb_types::{EntityId, Timestamp, TypeTag};
