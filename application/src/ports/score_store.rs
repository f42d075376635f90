//! Key-value store port for persisted high scores.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from a key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Small persistent key-value contract.
///
/// Setters stage values in memory; [`save`](Self::save) makes them durable.
pub trait KeyValueStore: Send + Sync {
    fn get_int(&self, key: &str, default: i64) -> i64;

    fn set_int(&self, key: &str, value: i64);

    fn get_string(&self, key: &str, default: &str) -> String;

    fn set_string(&self, key: &str, value: &str);

    fn save(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    Int(i64),
    Text(String),
}

/// Volatile store for tests and `--no-config` runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: Mutex<HashMap<String, StoredValue>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.lock() {
            Ok(values) => match values.get(key) {
                Some(StoredValue::Int(v)) => *v,
                _ => default,
            },
            Err(_) => default,
        }
    }

    fn set_int(&self, key: &str, value: i64) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), StoredValue::Int(value));
        }
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.values.lock() {
            Ok(values) => match values.get(key) {
                Some(StoredValue::Text(v)) => v.clone(),
                _ => default.to_string(),
            },
            Err(_) => default.to_string(),
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), StoredValue::Text(value.to_string()));
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
