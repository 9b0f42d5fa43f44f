//! The closed set of entity types known to the console.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical type name of an entity.
///
/// The tag is the prefix of every storage key (`"<Type>.<id>"`) and the
/// `__class__` value of every persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl TypeTag {
    /// Every known tag, in declaration order.
    pub const ALL: [TypeTag; 7] = [
        TypeTag::BaseModel,
        TypeTag::User,
        TypeTag::State,
        TypeTag::City,
        TypeTag::Amenity,
        TypeTag::Place,
        TypeTag::Review,
    ];

    /// Returns the tag's name as used in keys and records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeTag::BaseModel => "BaseModel",
            TypeTag::User => "User",
            TypeTag::State => "State",
            TypeTag::City => "City",
            TypeTag::Amenity => "Amenity",
            TypeTag::Place => "Place",
            TypeTag::Review => "Review",
        }
    }

    /// Looks up a tag by its exact (case-sensitive) name.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name)
            .ok_or_else(|| Error::UnknownType(name.to_owned()))
    }

    /// Builds the storage key for an id of this type.
    #[must_use]
    pub fn key_for(&self, id: &str) -> String {
        format!("{}.{}", self.as_str(), id)
    }

    /// Returns the key prefix shared by every entity of this type (`"<Type>."`).
    #[must_use]
    pub fn key_prefix(&self) -> String {
        format!("{}.", self.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
