use hbnb_types::TypeTag;
use serde_json::Value;

/// Declares the default attribute set of an entity type.
///
/// Defaults are what an entity reports for an attribute nobody has set yet.
/// They are never written to disk until an explicit value replaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub type_tag: TypeTag,
    pub fields: &'static [DefaultAttribute],
}

/// One declared attribute and the kind of its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultAttribute {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl DefaultAttribute {
    /// Shorthand for a text attribute defaulting to `""`.
    pub const fn text(name: &'static str) -> Self {
        Self { name, field_type: FieldType::Text }
    }

    /// Shorthand for an integer attribute defaulting to `0`.
    pub const fn integer(name: &'static str) -> Self {
        Self { name, field_type: FieldType::Integer }
    }

    /// Shorthand for a float attribute defaulting to `0.0`.
    pub const fn float(name: &'static str) -> Self {
        Self { name, field_type: FieldType::Float }
    }

    /// Shorthand for a list attribute defaulting to `[]`.
    pub const fn list(name: &'static str) -> Self {
        Self { name, field_type: FieldType::List }
    }

    /// Returns this attribute's default value.
    pub fn default_value(&self) -> Value {
        self.field_type.default_value()
    }
}

/// The data type of a declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Float,
    List,
}

impl FieldType {
    /// The zero value of this type.
    pub fn default_value(&self) -> Value {
        match self {
            FieldType::Text => Value::String(String::new()),
            FieldType::Integer => Value::from(0),
            FieldType::Float => Value::from(0.0),
            FieldType::List => Value::Array(Vec::new()),
        }
    }
}

const BASE_MODEL: &[DefaultAttribute] = &[];

const USER: &[DefaultAttribute] = &[
    DefaultAttribute::text("email"),
    DefaultAttribute::text("password"),
    DefaultAttribute::text("first_name"),
    DefaultAttribute::text("last_name"),
];

const STATE: &[DefaultAttribute] = &[DefaultAttribute::text("name")];

const CITY: &[DefaultAttribute] = &[
    DefaultAttribute::text("state_id"),
    DefaultAttribute::text("name"),
];

const AMENITY: &[DefaultAttribute] = &[DefaultAttribute::text("name")];

const PLACE: &[DefaultAttribute] = &[
    DefaultAttribute::text("city_id"),
    DefaultAttribute::text("user_id"),
    DefaultAttribute::text("name"),
    DefaultAttribute::text("description"),
    DefaultAttribute::integer("number_rooms"),
    DefaultAttribute::integer("number_bathrooms"),
    DefaultAttribute::integer("max_guest"),
    DefaultAttribute::integer("price_by_night"),
    DefaultAttribute::float("latitude"),
    DefaultAttribute::float("longitude"),
    DefaultAttribute::list("amenity_ids"),
];

const REVIEW: &[DefaultAttribute] = &[
    DefaultAttribute::text("place_id"),
    DefaultAttribute::text("user_id"),
    DefaultAttribute::text("text"),
];

impl EntitySchema {
    /// Returns the declared schema of a type.
    pub const fn for_type(type_tag: TypeTag) -> Self {
        let fields = match type_tag {
            TypeTag::BaseModel => BASE_MODEL,
            TypeTag::User => USER,
            TypeTag::State => STATE,
            TypeTag::City => CITY,
            TypeTag::Amenity => AMENITY,
            TypeTag::Place => PLACE,
            TypeTag::Review => REVIEW,
        };
        Self { type_tag, fields }
    }

    /// Looks up a declared attribute by name.
    pub fn field(&self, name: &str) -> Option<&DefaultAttribute> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the default value of a declared attribute.
    pub fn default_for(&self, name: &str) -> Option<Value> {
        self.field(name).map(DefaultAttribute::default_value)
    }
}
