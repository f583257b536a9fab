//! String-keyed key-value stores
//!
//! The identity store persists its state as a handful of string keys. These
//! backends hold those keys either in memory or in a JSON object on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::PaySphereError;

use super::file_io::{read_json, write_json_atomic};

/// A string-keyed store of string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaySphereError>;

    /// Insert or overwrite a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), PaySphereError>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), PaySphereError>;
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaySphereError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PaySphereError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PaySphereError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The file is read on every `get` so separate instances pointing at the same
/// path (e.g. before and after a restart) agree. Every change rewrites the
/// whole object atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PaySphereError> {
        read_json(&self.path)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PaySphereError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PaySphereError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        write_json_atomic(&self.path, &entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), PaySphereError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        write_json_atomic(&self.path, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("user").unwrap(), None);

        store.set("user", "first").unwrap();
        store.set("user", "second").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("second"));

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);

        // Idempotent
        store.remove("user").unwrap();
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().join("session.json"));
        exercise(&mut store);
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let mut store = JsonFileStore::new(path.clone());
        store.set("isAuthenticated", "true").unwrap();

        let reopened = JsonFileStore::new(path);
        assert_eq!(
            reopened.get("isAuthenticated").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_json_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "{ broken").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.get("user"),
            Err(PaySphereError::Storage(_))
        ));
    }
}
