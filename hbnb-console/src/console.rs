use crate::error::{CommandError, CommandResult};
use hbnb_model::{AttrValue, Entity};
use hbnb_storage::FileStorage;
use hbnb_types::{EntityId, TypeTag};
use serde_json::{Map, Value};
use tracing::debug;

/// Entity operations exposed to the command shell.
///
/// Every mutating call persists the whole table before returning.
#[derive(Debug)]
pub struct Console {
    storage: FileStorage,
}

impl Console {
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Releases the underlying store.
    pub fn into_storage(self) -> FileStorage {
        self.storage
    }

    /// Resolves a class name against the registry.
    pub fn resolve(&self, class: &str) -> CommandResult<TypeTag> {
        Ok(self.storage.registry().resolve(class)?)
    }

    /// Storage key of an existing entity, or `NotFound`.
    pub fn locate(&self, class: &str, id: &str) -> CommandResult<String> {
        let key = self.resolve(class)?.key_for(id);
        if self.storage.contains(&key) {
            Ok(key)
        } else {
            Err(CommandError::NotFound(key))
        }
    }

    /// Creates, registers and saves a new entity, returning its id.
    ///
    /// The entity is unregistered again if the save fails.
    pub fn create(&mut self, class: &str) -> CommandResult<EntityId> {
        let entity = self.storage.registry().create(class)?;
        let id = entity.id().clone();
        let key = self.storage.new_entity(entity);
        if let Err(err) = self.storage.save_entity(&key) {
            let _ = self.storage.delete(&key);
            return Err(err.into());
        }
        debug!(%key, "created");
        Ok(id)
    }

    /// Display string of one entity.
    pub fn show(&self, class: &str, id: &str) -> CommandResult<String> {
        let key = self.locate(class, id)?;
        self.storage
            .get(&key)
            .map(Entity::to_string)
            .ok_or(CommandError::NotFound(key))
    }

    /// Removes an entity and persists the table.
    ///
    /// The entity stays in the table if the save fails.
    pub fn destroy(&mut self, class: &str, id: &str) -> CommandResult<()> {
        let key = self.locate(class, id)?;
        let removed = self.storage.delete(&key)?;
        if let Err(err) = self.storage.save() {
            self.storage.upsert(key, removed);
            return Err(err.into());
        }
        debug!(%key, "destroyed");
        Ok(())
    }

    /// Display strings of every entity, or of one class.
    pub fn all(&self, class: Option<&str>) -> CommandResult<Vec<String>> {
        let shown = match class {
            Some(class) => {
                let tag = self.resolve(class)?;
                self.storage
                    .iter_type(tag)
                    .map(|(_, e)| e.to_string())
                    .collect()
            }
            None => self.storage.iter().map(|(_, e)| e.to_string()).collect(),
        };
        Ok(shown)
    }

    /// Sets one attribute from raw command text.
    ///
    /// The value is coerced with [`AttrValue::coerce`]: digits become an
    /// integer, `digits.digits` a float, anything else stays text.
    pub fn update(&mut self, class: &str, id: &str, attribute: &str, raw: &str) -> CommandResult<()> {
        let mut attributes = Map::new();
        attributes.insert(attribute.to_owned(), AttrValue::coerce(raw).into_json());
        self.update_many(class, id, attributes)
    }

    /// Sets several attributes at once, taking the JSON values as given.
    ///
    /// Either every attribute is applied and saved, or none is.
    pub fn update_many(&mut self, class: &str, id: &str, attributes: Map<String, Value>) -> CommandResult<()> {
        let key = self.locate(class, id)?;
        let mut entity = self
            .storage
            .get(&key)
            .cloned()
            .ok_or_else(|| CommandError::NotFound(key.clone()))?;

        for (name, value) in attributes {
            entity.set(name, value)?;
        }
        entity.touch();

        let previous = self.storage.upsert(key.clone(), entity);
        if let Err(err) = self.storage.save() {
            if let Some(previous) = previous {
                self.storage.upsert(key, previous);
            }
            return Err(err.into());
        }
        debug!(%key, "updated");
        Ok(())
    }

    /// Number of entities of one class.
    pub fn count(&self, class: &str) -> CommandResult<usize> {
        Ok(self.storage.count(self.resolve(class)?))
    }
}
