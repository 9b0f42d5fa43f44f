use crate::error::{ModelError, ModelResult};
use crate::schema::EntitySchema;
use hbnb_types::{EntityId, Timestamp, TypeTag};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Flat JSON object form of an entity, as persisted on disk.
pub type Record = Map<String, Value>;

/// Record key carrying the entity's type tag.
pub const CLASS_KEY: &str = "__class__";

const ID_KEY: &str = "id";
const CREATED_AT_KEY: &str = "created_at";
const UPDATED_AT_KEY: &str = "updated_at";

/// A typed record managed by the object store.
///
/// Identity (`id`) and timestamps are typed fields; everything else lives in
/// an open attribute map so that attributes unknown to the declared schema
/// survive a save/reload cycle untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    type_tag: TypeTag,
    created_at: Timestamp,
    updated_at: Timestamp,
    attributes: BTreeMap<String, Value>,
}

impl Entity {
    /// Creates a fresh entity with a random id and `created_at == updated_at == now`.
    ///
    /// This does not register the entity anywhere; hand it to the store's
    /// `new_entity` to make it live.
    pub fn new(type_tag: TypeTag) -> Self {
        let now = Timestamp::now();
        Self {
            id: EntityId::new(),
            type_tag,
            created_at: now,
            updated_at: now,
            attributes: BTreeMap::new(),
        }
    }

    /// Rebuilds an entity from a persisted record.
    ///
    /// Every key except `__class__` is copied onto the entity. `id`,
    /// `created_at` and `updated_at` are required; timestamps must be in
    /// `YYYY-MM-DDTHH:MM:SS.ffffff` form.
    pub fn from_record(type_tag: TypeTag, record: Record) -> ModelResult<Self> {
        let mut id = None;
        let mut created_at = None;
        let mut updated_at = None;
        let mut attributes = BTreeMap::new();

        for (key, value) in record {
            match key.as_str() {
                CLASS_KEY => {}
                ID_KEY => id = Some(EntityId::from_string(expect_str(&key, value)?)),
                CREATED_AT_KEY => created_at = Some(Timestamp::parse(&expect_str(&key, value)?)?),
                UPDATED_AT_KEY => updated_at = Some(Timestamp::parse(&expect_str(&key, value)?)?),
                _ => {
                    attributes.insert(key, value);
                }
            }
        }

        Ok(Self {
            id: id.ok_or_else(|| missing(ID_KEY))?,
            type_tag,
            created_at: created_at.ok_or_else(|| missing(CREATED_AT_KEY))?,
            updated_at: updated_at.ok_or_else(|| missing(UPDATED_AT_KEY))?,
            attributes,
        })
    }

    /// Renders the entity as a flat record including `__class__`.
    pub fn to_record(&self) -> Record {
        let mut record: Record = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        record.insert(ID_KEY.into(), Value::String(self.id.to_string()));
        record.insert(CREATED_AT_KEY.into(), Value::String(self.created_at.to_string()));
        record.insert(UPDATED_AT_KEY.into(), Value::String(self.updated_at.to_string()));
        record.insert(CLASS_KEY.into(), Value::String(self.type_tag.to_string()));
        record
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Storage key of this entity: `"<Type>.<id>"`.
    pub fn key(&self) -> String {
        self.type_tag.key_for(self.id.as_str())
    }

    /// The declared schema of this entity's type.
    pub fn schema(&self) -> EntitySchema {
        EntitySchema::for_type(self.type_tag)
    }

    /// Advances `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    /// Returns an explicitly set attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns all explicitly set attributes, sorted by name.
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Returns an attribute, falling back to the schema default.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.attributes.get(name) {
            Some(v) => Some(v.clone()),
            None => self.schema().default_for(name),
        }
    }

    /// Sets an attribute. Identity fields and `__class__` are read-only.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> ModelResult<()> {
        let name = name.into();
        if is_reserved(&name) {
            return Err(ModelError::ReadOnlyAttribute(name));
        }
        self.attributes.insert(name, value.into());
        Ok(())
    }

    /// Removes an explicitly set attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

impl fmt::Display for Entity {
    /// `[<Type>] (<id>) {<attributes>}` with attributes in sorted key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: BTreeMap<&str, String> = BTreeMap::new();
        fields.insert(ID_KEY, repr_str(self.id.as_str()));
        fields.insert(CREATED_AT_KEY, self.created_at.to_repr());
        fields.insert(UPDATED_AT_KEY, self.updated_at.to_repr());
        for (k, v) in &self.attributes {
            fields.insert(k.as_str(), repr(v));
        }

        write!(f, "[{}] ({}) {{", self.type_tag, self.id)?;
        for (i, (k, v)) in fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", repr_str(k), v)?;
        }
        f.write_str("}")
    }
}

fn is_reserved(name: &str) -> bool {
    matches!(name, ID_KEY | CREATED_AT_KEY | UPDATED_AT_KEY | CLASS_KEY)
}

fn expect_str(key: &str, value: Value) -> ModelResult<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ModelError::Parse(format!("field `{key}` must be a string, got {other}"))),
    }
}

fn missing(key: &str) -> ModelError {
    ModelError::Parse(format!("record is missing `{key}`"))
}

fn repr_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".into(),
        Value::Bool(true) => "True".into(),
        Value::Bool(false) => "False".into(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => repr_str(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let mut out = String::from("{");
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}: {}", repr_str(k), repr(v));
            }
            out.push('}');
            out
        }
    }
}
