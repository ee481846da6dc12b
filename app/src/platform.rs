//! File-backed durable storage for the shell
//!
//! All keys live in one JSON object in `<data-dir>/storage.json`. Writes go
//! to a temp file that is then renamed over the original. They are
//! synchronous, matching the synchronous `DurableStorage` contract the
//! reducer relies on.

use crate::AppError;
use conduit_core::environment::{DurableStorage, StorageError};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Name of the storage file inside the data directory
pub const STORAGE_FILE: &str = "storage.json";

/// Durable storage in a JSON file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or create on first write) the storage file in `data_dir`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] wrapping [`StorageError::Io`] if an
    /// existing file cannot be read and [`StorageError::Corrupt`] if it is
    /// not a JSON object of strings.
    pub fn open(data_dir: &Path) -> crate::Result<Self> {
        let path = data_dir.join(STORAGE_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| StorageError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Io(format!("{}: {e}", path.display())).into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every entry to disk before returning
    ///
    /// Blocking: runs inside the reducer with the store's state lock held.
    /// The file holds only the session token, so the write is one small
    /// file plus a rename.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io = |operation: &str, e: std::io::Error| {
            StorageError::Io(format!("{operation} {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io("create directory for", e))?;
        }

        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let temp_path = self.path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|e| io("create temp file for", e))?;
        file.write_all(&json).map_err(|e| io("write", e))?;
        file.sync_all().map_err(|e| io("sync", e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| io("replace", e))?;

        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reopening() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("token", "abc").unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn writes_are_on_disk_when_set_returns() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        storage.set("token", "abc").unwrap();

        let text = fs::read_to_string(storage.path()).unwrap();
        assert!(text.contains("\"token\": \"abc\""), "{text}");
        assert!(!storage.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn remove_is_persisted_and_idempotent() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set("token", "abc").unwrap();
        storage.remove("token").unwrap();
        storage.remove("token").unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("token"), None);
    }

    #[test]
    fn missing_directory_is_created_on_write() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        assert_eq!(storage.get("token"), None);

        storage.set("token", "abc").unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "not json").unwrap();
        assert!(matches!(
            FileStorage::open(dir.path()),
            Err(AppError::Storage(StorageError::Corrupt(_)))
        ));
    }
}
