//! In-Memory Persistence
//!
//! HashMap substrate for tests and for running without a data directory.
//! Does not survive restarts; shares the `PersistStore` contract so tests
//! can inject corrupt values or simulate write failures.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::persist::PersistStore;

// == Memory Store ==
/// Volatile durable-tier stand-in.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `write` fail, simulating quota exhaustion.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Plants a raw value under `key`, bypassing the cache codec. Lets tests
    /// model corruption and pre-existing foreign keys.
    pub fn inject(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PersistStore for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "simulated quota exceeded",
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }

    fn clear_namespace(&mut self) -> Result<(), StoreError> {
        self.values.clear();
        Ok(())
    }
}
