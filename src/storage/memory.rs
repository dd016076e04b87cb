use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use super::JarStorage;
use crate::errors::{JarError, Result};

/// In-memory storage used by tests and embedders that do not need durability.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.records
            .lock()
            .map_err(|_| JarError::Storage("memory storage lock poisoned".into()))
    }
}

impl JarStorage for MemoryStorage {
    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.records()?.keys().cloned().collect())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records()?.get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.records()?.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.records()?.remove(key).is_some())
    }
}
