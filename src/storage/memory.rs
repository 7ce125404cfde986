use std::{
    collections::HashMap,
    io,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::errors::FinanceError;

use super::{KeyValueStore, Result};

/// In-process store, used by tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.entries.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.entries.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> FinanceError {
    FinanceError::Io(io::Error::new(
        io::ErrorKind::Other,
        "memory store lock poisoned",
    ))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }
}
