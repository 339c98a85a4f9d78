//! Opaque key-value persistence.
//!
//! The board persists a handful of independent records (players, formations,
//! selection, preferences) as JSON strings under fixed keys. The storage
//! backend is abstracted behind [`KeyValueStore`]; [`MemoryStore`] keeps
//! values in memory and [`JsonDirStore`] writes one `<key>.json` file per key.
//!
//! Reading is forgiving: [`load_or_default`] returns the provided default
//! whenever a value is absent, unreadable or does not parse.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {key}")]
    InvalidKey { key: String },
}

/// String-keyed, string-valued storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store, used for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open (and create if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JsonDirStore { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonDirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }
}

/// The session's store, shared by the persistence system.
#[derive(Resource)]
pub struct BoardStore(pub Box<dyn KeyValueStore>);

impl BoardStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        BoardStore(Box::new(store))
    }
}

/// Read and parse `key`, or return `default` when it is absent or unusable.
pub fn load_or_default<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored value for '{}' does not parse, using default: {}", key, e);
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!("Failed to read '{}', using default: {}", key, e);
            default
        }
    }
}

pub fn save_value<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}
