//! Key-value store implementations.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use routina_core::error::{Result, RoutinaError};
use routina_core::persistence::KeyValueStore;
use tracing::debug;

use super::atomic_json::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// In-memory store for tests and sessions without a data directory.
///
/// Clone-friendly via Arc; clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RoutinaError::storage("lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RoutinaError::storage("lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RoutinaError::storage("lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object file.
///
/// Entries are cached in memory after `open`; every write goes through an
/// atomic read-modify-write of the whole file.
pub struct JsonFileKeyValueStore {
    file: AtomicJsonFile<Entries>,
    cache: RwLock<Entries>,
}

impl JsonFileKeyValueStore {
    /// Opens (or lazily creates) the store at `path`.
    ///
    /// A missing file yields an empty store. A corrupt file is an error.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = AtomicJsonFile::<Entries>::new(path);
        let entries = file.load()?.unwrap_or_default();
        debug!(path = %file.path().display(), count = entries.len(), "opened key-value store");
        Ok(Self {
            file,
            cache: RwLock::new(entries),
        })
    }

    fn write<F>(&self, apply: F) -> Result<()>
    where
        F: Fn(&mut Entries),
    {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| RoutinaError::storage("lock poisoned"))?;
        self.file.update(Entries::new(), |entries| apply(entries))?;
        apply(&mut *cache);
        Ok(())
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let cache = self
            .cache
            .read()
            .map_err(|_| RoutinaError::storage("lock poisoned"))?;
        Ok(cache.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write(|entries| {
            entries.remove(key);
        })
    }
}
