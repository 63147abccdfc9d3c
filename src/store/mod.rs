//! Saved routes and calculation history.
//!
//! Everything here goes through the `KeyValueStore` trait, so the caller
//! decides where data lives (in memory for tests, a JSON file for the CLI).
//! Values are JSON strings; the engine never touches this module.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub mod history;
pub mod routes;

pub use history::*;
pub use routes::*;

/// String key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), AppError>;
    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store backed by a single JSON object on disk.
///
/// The file is re-read on every access and rewritten on every change. A
/// missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, AppError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(&self.path)
            .map_err(|e| AppError::new(2, format!("Failed to open store '{}': {e}", self.path.display())))?;
        serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Corrupt store '{}': {e}", self.path.display())))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        let file = File::create(&self.path)
            .map_err(|e| AppError::new(2, format!("Failed to write store '{}': {e}", self.path.display())))?;
        serde_json::to_writer_pretty(file, entries)
            .map_err(|e| AppError::new(2, format!("Failed to write store '{}': {e}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Read a JSON list stored under `key`; absent keys read as empty.
fn read_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>, AppError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| AppError::new(2, format!("Stored '{key}' is not valid JSON: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn write_list<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, items: &[T]) -> Result<(), AppError> {
    let raw = serde_json::to_string(items)
        .map_err(|e| AppError::new(4, format!("Failed to encode '{key}': {e}")))?;
    store.set(key, raw)
}

/// Millisecond timestamp id, bumped until it is not in `taken`.
fn fresh_id<'a>(now_ms: i64, taken: impl Iterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = taken.collect();
    let mut candidate = now_ms;
    while taken.contains(&candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let path = std::env::temp_dir().join(format!("miles-store-{}-{name}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        FileStore::new(path)
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_between_handles() {
        let mut store = temp_store("persist");
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();

        let reopened = FileStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));

        store.remove("a").unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), "not json").unwrap();
        let err = store.get("a").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn fresh_ids_skip_taken_values() {
        assert_eq!(fresh_id(100, ["100", "101"].into_iter()), "102");
        assert_eq!(fresh_id(100, std::iter::empty()), "100");
    }
}
