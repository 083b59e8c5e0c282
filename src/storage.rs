//! Storage module - key-value blob persistence
//!
//! The store persists its whole collection as one opaque string under one
//! fixed key, so the contract is just get/set. No transactions, no retries.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Key-value blob store addressable by string keys.
pub trait BlobStore {
    /// Returns the stored value, or `None` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open or create the data directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // Write via temp file + rename so a failed write never truncates
        // the existing document.
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests. Clones share the same map, so a second
/// consumer opened over a clone sees earlier writes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. with a malformed document.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.map.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("workouts", "[]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("workouts", "old").unwrap();
        store.set("workouts", "new").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_file_store_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        store.set("workouts", "[]").unwrap();
        assert!(nested.join("workouts.json").exists());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("workouts", "[]").unwrap();
        assert_eq!(other.get("workouts").unwrap().as_deref(), Some("[]"));
    }
}
