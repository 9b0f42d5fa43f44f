use crate::entity::{CLASS_KEY, Entity, Record};
use crate::error::{ModelError, ModelResult};
use hbnb_types::TypeTag;
use serde_json::Value;
use std::collections::BTreeMap;

/// Builds entities of one type, either fresh or from a persisted record.
///
/// The default methods cover every built-in type. Implement this only to
/// hook extra validation or post-load processing onto a type.
pub trait EntityFactory: Send + Sync {
    /// The tag this factory produces.
    fn type_tag(&self) -> TypeTag;

    /// Construct-new: a fresh, unregistered entity.
    fn create(&self) -> Entity {
        Entity::new(self.type_tag())
    }

    /// Construct-from-record.
    fn rehydrate(&self, record: Record) -> ModelResult<Entity> {
        Entity::from_record(self.type_tag(), record)
    }
}

/// Factory with no behavior beyond the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardFactory(pub TypeTag);

impl EntityFactory for StandardFactory {
    fn type_tag(&self) -> TypeTag {
        self.0
    }
}

/// Closed mapping from type name to factory.
///
/// Type dispatch on reload goes through this table only; a persisted
/// `__class__` that is not registered is rejected.
pub struct Registry {
    factories: BTreeMap<&'static str, Box<dyn EntityFactory>>,
}

impl Registry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in type.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for tag in TypeTag::ALL {
            registry.register(Box::new(StandardFactory(tag)));
        }
        registry
    }

    /// Registers a factory, replacing any previous one for the same tag.
    pub fn register(&mut self, factory: Box<dyn EntityFactory>) {
        self.factories.insert(factory.type_tag().as_str(), factory);
    }

    /// Looks up the factory for a type name.
    pub fn get(&self, name: &str) -> ModelResult<&dyn EntityFactory> {
        self.factories
            .get(name)
            .map(|f| &**f)
            .ok_or_else(|| ModelError::UnknownType(name.to_owned()))
    }

    /// Resolves a type name to its tag, if registered.
    pub fn resolve(&self, name: &str) -> ModelResult<TypeTag> {
        self.get(name).map(|f| f.type_tag())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct-new for a type name.
    pub fn create(&self, name: &str) -> ModelResult<Entity> {
        Ok(self.get(name)?.create())
    }

    /// Rebuilds an entity from a record, dispatching on its `__class__` field.
    pub fn rehydrate(&self, record: Record) -> ModelResult<Entity> {
        let name = match record.get(CLASS_KEY) {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(ModelError::Parse(format!(
                    "`{CLASS_KEY}` must be a string, got {other}"
                )));
            }
            None => return Err(ModelError::Parse(format!("record is missing `{CLASS_KEY}`"))),
        };
        self.get(&name)?.rehydrate(record)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
