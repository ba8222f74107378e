//! Key-value persistence layer
//!
//! String keys to string values, written through on every mutation.
//! `FileStore` keeps the whole map in one JSON document on disk;
//! `MemoryStore` is the same contract without a backing file.

use super::error::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// File name used inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// Synchronous string key-value storage
///
/// Every `set`/`remove`/`clear` is durable when it returns.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a single key
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Delete every key
    fn clear(&self) -> StoreResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|e| StoreError::Lock(e.to_string()))
}

/// In-memory store, used for tests and `--ephemeral` runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        lock(&self.entries)?.clear();
        Ok(())
    }
}

/// JSON-file backed store
///
/// The file is rewritten (temp file + rename) after each mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store in `data_dir`, creating the directory if needed
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORAGE_FILE);

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if !content.trim().is_empty() => {
                match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                    Ok(entries) => entries,
                    Err(e) => {
                        tracing::warn!(path = ?path, error = %e, "Corrupt storage file, starting empty");
                        BTreeMap::new()
                    }
                }
            }
            Ok(_) => BTreeMap::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = ?path, keys = entries.len(), "Opened storage file");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy, write it, then swap it in
    ///
    /// The in-memory map is left untouched when the write fails.
    fn update<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut entries = lock(&self.entries)?;
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> StoreResult<()> {
        self.update(|entries| {
            entries.clear();
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("user", "Ada").unwrap();
            store.set("fontSize", "large").unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("Ada"));
        assert_eq!(store.get("fontSize").unwrap().as_deref(), Some("large"));
    }

    #[test]
    fn test_file_store_clear() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear().unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("theme", "light").unwrap();

        // A directory in place of the file makes the rename fail
        std::fs::remove_file(store.path()).unwrap();
        std::fs::create_dir(store.path()).unwrap();

        assert!(store.set("theme", "dark").is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        assert!(store.set("user", "Ada").is_err());
        assert_eq!(store.get("user").unwrap(), None);

        assert!(store.clear().is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(STORAGE_FILE), "{not json").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }
}
