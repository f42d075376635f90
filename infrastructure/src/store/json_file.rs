//! JSON file implementation of the key-value store port.
//!
//! Values live in memory until [`save`](KeyValueStore::save), which writes a
//! sibling temp file and renames it over the target so a crash mid-write
//! never leaves a truncated store behind.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use trivia_application::{KeyValueStore, StoreError};

pub struct JsonFileStore {
    values: Mutex<Map<String, Value>>,
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(StoreError::Serialization(format!(
                        "{} does not contain a JSON object",
                        path.display()
                    )));
                }
                Err(e) => return Err(StoreError::Serialization(e.to_string())),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Opened score store {} ({} keys)", path.display(), values.len());
        Ok(Self {
            values: Mutex::new(values),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(|v| v.as_i64()).unwrap_or(default)
    }

    fn set_int(&self, key: &str, value: i64) {
        self.set(key, Value::from(value));
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        self.set(key, Value::from(value));
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = {
            let values = self
                .values
                .lock()
                .map_err(|_| StoreError::Serialization("store lock poisoned".to_string()))?;
            serde_json::to_string_pretty(&*values)
                .map_err(|e| StoreError::Serialization(e.to_string()))?
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Saved score store {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("scores.json")).unwrap();
        assert_eq!(store.get_int("HighScore", 0), 0);
        assert_eq!(store.get_string("HighScoreDate", "none"), "none");
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set_int("HighScore", 12_400);
        store.set_string("HighScoreGrade", "C");
        store.save().unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("HighScore", 0), 12_400);
        assert_eq!(reopened.get_string("HighScoreGrade", ""), "C");
        assert!(!dir.path().join("nested").join("scores.json.tmp").exists());
    }

    #[test]
    fn test_unsaved_values_are_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set_int("HighScore", 1);
        drop(store);

        assert!(!path.exists());
    }

    #[test]
    fn test_type_mismatch_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("scores.json")).unwrap();
        store.set_string("HighScore", "lots");
        assert_eq!(store.get_int("HighScore", 7), 7);
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
