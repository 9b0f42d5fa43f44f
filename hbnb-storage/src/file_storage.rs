use crate::error::{StorageError, StorageResult};
use hbnb_model::{Entity, Record, Registry};
use hbnb_types::TypeTag;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Default location of the persisted document.
pub const DEFAULT_PATH: &str = "objects.json";

/// In-memory entity table backed by a single JSON file.
///
/// Not safe for concurrent writers: two processes sharing one file will
/// lose each other's updates.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    registry: Registry,
    objects: BTreeMap<String, Entity>,
}

impl FileStorage {
    /// Creates an empty store for `path` without touching the file system.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_registry(path, Registry::standard())
    }

    /// Creates an empty store that rehydrates records through `registry`.
    pub fn with_registry(path: impl Into<PathBuf>, registry: Registry) -> Self {
        Self {
            path: path.into(),
            registry,
            objects: BTreeMap::new(),
        }
    }

    /// Opens (or starts) the store at `path`, loading any existing document.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let mut store = Self::new(path);
        let loaded = store.reload()?;
        info!(path = %store.path.display(), loaded, "object store opened");
        Ok(store)
    }

    /// Saves the table one last time and releases the store.
    pub fn close(self) -> StorageResult<()> {
        self.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns a copy of the whole table.
    pub fn all(&self) -> BTreeMap<String, Entity> {
        self.objects.clone()
    }

    /// Iterates over every `(key, entity)` pair in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over entries whose key starts with `"<Type>."`.
    pub fn iter_type(&self, type_tag: TypeTag) -> impl Iterator<Item = (&str, &Entity)> {
        let prefix = type_tag.key_prefix();
        self.objects
            .range(prefix.clone()..)
            .take_while(move |(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entities of one type.
    pub fn count(&self, type_tag: TypeTag) -> usize {
        self.iter_type(type_tag).count()
    }

    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.objects.get(key)
    }

    /// Looks up an entity by type and id.
    pub fn find(&self, type_tag: TypeTag, id: &str) -> Option<&Entity> {
        self.objects.get(&type_tag.key_for(id))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Registers an entity under `"<Type>.<id>"` and returns that key.
    ///
    /// An existing entry with the same key is silently replaced.
    pub fn new_entity(&mut self, entity: Entity) -> String {
        let key = entity.key();
        debug!(%key, "registering entity");
        self.objects.insert(key.clone(), entity);
        key
    }

    /// Inserts or replaces the entry at `key`, returning the previous entity.
    pub fn upsert(&mut self, key: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.objects.insert(key.into(), entity)
    }

    /// Removes the entry at `key` from the table. Call [`save`](Self::save) to persist.
    pub fn delete(&mut self, key: &str) -> StorageResult<Entity> {
        self.objects
            .remove(key)
            .ok_or_else(|| StorageError::NotFound(key.to_owned()))
    }

    /// Advances `updated_at` of the entity at `key`, then persists the table.
    pub fn save_entity(&mut self, key: &str) -> StorageResult<()> {
        let entity = self
            .objects
            .get_mut(key)
            .ok_or_else(|| StorageError::NotFound(key.to_owned()))?;
        entity.touch();
        self.save()
    }

    /// Renders the table as the persisted JSON object.
    pub fn to_document(&self) -> serde_json::Map<String, Value> {
        self.objects
            .iter()
            .map(|(k, v)| (k.clone(), Value::Object(v.to_record())))
            .collect()
    }

    /// Writes the whole table to disk.
    ///
    /// The document is written to a temporary file next to the target and
    /// renamed over it, so a failed save leaves the previous document intact.
    pub fn save(&self) -> StorageResult<()> {
        let document = Value::Object(self.to_document());
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, &document)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), count = self.objects.len(), "saved objects");
        Ok(())
    }

    /// Loads the persisted document into the table.
    ///
    /// A missing file is not an error and leaves the table as it is.
    /// Entries are inserted under the document's own keys. On any error the
    /// table is left unchanged. Returns the number of entries loaded.
    pub fn reload(&mut self) -> StorageResult<usize> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted document, starting empty");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let loaded = self.parse_document(&text)?;
        let count = loaded.len();
        self.objects.extend(loaded);
        debug!(path = %self.path.display(), count, "reloaded objects");
        Ok(count)
    }

    fn parse_document(&self, text: &str) -> StorageResult<BTreeMap<String, Entity>> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| StorageError::Parse(format!("{}: {e}", self.path.display())))?;
        let Value::Object(entries) = document else {
            return Err(StorageError::Parse(format!(
                "{}: top level must be a JSON object",
                self.path.display()
            )));
        };

        let mut loaded = BTreeMap::new();
        for (key, value) in entries {
            let record: Record = match value {
                Value::Object(record) => record,
                other => {
                    return Err(StorageError::Parse(format!(
                        "entry `{key}` must be an object, got {other}"
                    )));
                }
            };
            let entity = self.registry.rehydrate(record).map_err(|e| match StorageError::from(e) {
                StorageError::Parse(msg) => StorageError::Parse(format!("entry `{key}`: {msg}")),
                other => other,
            })?;
            loaded.insert(key, entity);
        }
        Ok(loaded)
    }
}
