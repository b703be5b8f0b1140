//! Persisted key-value options (tokens, OAuth state).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key holding the OAuth token.
pub const TOKEN_KEY: &str = "docpress_token";

/// Key holding the pending OAuth state.
pub const STATE_KEY: &str = "docpress_oauth_state";

/// A process-wide store of JSON values by key.
pub trait OptionStore {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// Options kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    values: HashMap<String, Value>,
}

impl MemoryOptionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a key is set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Options kept in a single JSON object file.
///
/// The file is read on every access and rewritten on every change, so
/// several processes see each other's updates.
#[derive(Debug, Clone)]
pub struct FileOptionStore {
    path: PathBuf,
}

impl FileOptionStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let data = fs::read(&self.path)?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&data)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Config(format!(
                "Option store {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(map)?)?;
        Ok(())
    }
}

impl OptionStore for FileOptionStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value);
        self.save(&map)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryOptionStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", json!({"a": 1})).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"a": 1})));

        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert!(!store.contains("k"));
    }

    #[test]
    fn test_file_store_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("options.json");

        let mut store = FileOptionStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, json!({"access_token": "abc"})).unwrap();
        store.set(STATE_KEY, json!("xyz")).unwrap();

        let reopened = FileOptionStore::new(&path);
        assert_eq!(
            reopened.get(TOKEN_KEY).unwrap(),
            Some(json!({"access_token": "abc"}))
        );

        store.delete(STATE_KEY).unwrap();
        assert_eq!(reopened.get(STATE_KEY).unwrap(), None);
        assert!(reopened.get(TOKEN_KEY).unwrap().is_some());
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("options.json");
        fs::write(&path, "[1, 2]").unwrap();

        let store = FileOptionStore::new(&path);
        assert!(matches!(store.get("k"), Err(Error::Config(_))));
    }
}
