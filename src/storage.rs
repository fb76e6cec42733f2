//! Key-value storage collaborator
//!
//! Stands in for the extension's local storage area.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

/// Key under which the selected spreadsheet id is stored
pub const SHEET_ID_KEY: &str = "sheetId";
/// Key under which the current page's record is stored
pub const JOB_DATA_KEY: &str = "jobData";

pub trait KeyValueStore: Send + Sync {
    fn put(&self, key: &str, value: Value);
    fn get(&self, key: &str) -> Option<Value>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&self, key: &str, value: Value) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }
}
