//! File-Backed Persistence
//!
//! One file per key under a data directory, so cached entries survive
//! process restarts. Keys are arbitrary strings; filenames are the URL-safe
//! base64 of the key, which keeps the mapping reversible and path-safe.

use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::StoreError;
use crate::persist::PersistStore;

// == File Store ==
/// Durable tier persisted to a directory of flat files.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    // == Constructor ==
    /// Opens (and creates if needed) the data directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Path of the file backing `key`.
    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(URL_SAFE_NO_PAD.encode(key))
    }
}

impl PersistStore for FileStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear_namespace(&mut self) -> Result<(), StoreError> {
        // Removes every file in the data directory, whatever wrote it
        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            if path.is_file() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
