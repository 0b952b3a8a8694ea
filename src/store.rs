//! Local snapshot persistence
//!
//! Each collection is stored as one whole JSON document under a fixed key and
//! replaced entirely on every save. Keys are independent; there is no
//! transaction across them.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::utils::data_dir::ensure_data_dir;

/// Persisted collections and their fixed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Theme,
    History,
    CustomStyles,
    Templates,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::History => "prompt_history",
            Self::CustomStyles => "custom_styles",
            Self::Templates => "prompt_templates",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Minimal synchronous key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        ensure_data_dir(&self.dir);
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed snapshot access on top of a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct Snapshots<S> {
    store: S,
}

impl<S: KeyValueStore> Snapshots<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the stored snapshot of `collection` with `data`
    pub fn save<T: Serialize + ?Sized>(
        &mut self,
        collection: Collection,
        data: &T,
    ) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(data)?;
        self.store.set(collection.key(), &content)?;
        debug!("Saved snapshot '{}'", collection);
        Ok(())
    }

    /// Load a snapshot. Missing, unreadable or malformed data yields the default.
    pub fn load<T: DeserializeOwned + Default>(&self, collection: Collection) -> T {
        match self.store.get(collection.key()) {
            Ok(Some(content)) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to parse snapshot '{}', using default: {}", collection, e);
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                warn!("Failed to read snapshot '{}', using default: {}", collection, e);
                T::default()
            }
        }
    }

    /// Remove a snapshot entirely
    pub fn clear(&mut self, collection: Collection) -> Result<(), StoreError> {
        self.store.remove(collection.key())
    }
}
