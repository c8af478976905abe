use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::storage::KvStorage;

/// In-memory storage behind the same interface, for tests and ephemeral
/// sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Pre-seeded storage, handy for exercising legacy payloads.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = MemoryStorage::new();
        storage
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
