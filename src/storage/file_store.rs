//! JSON-file backed store
//!
//! All keys live in one JSON object. Every write rewrites the whole file.

use super::{KeyValueStore, StorageError};
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const STORE_FILE: &str = "progress.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `dir/progress.json`. The directory is created if missing.
    pub fn in_dir(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self {
            path: dir.join(STORE_FILE),
        })
    }

    /// Store under the platform data directory
    pub fn default_location() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("br.com", "hodevweb", "hodev-diagnostic")
            .ok_or(StorageError::NoDataDir)?;
        Self::in_dir(dirs.data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StorageError::Io(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Deserialization(e.to_string()))
    }

    /// Entries to rewrite. A corrupt file starts over; a failed read aborts the
    /// write so the keys it holds are not lost.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(StorageError::Deserialization(e)) => {
                warn!(path = %self.path.display(), "Discarding corrupt store: {e}");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        if entries.remove(key).is_some() || !self.path.exists() {
            return self.write_all(&entries);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::in_dir(dir.path()).unwrap();
        store.save("hodevweb_step", "4").unwrap();
        store.save("other", "x").unwrap();

        let reopened = FileStore::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.load("hodevweb_step").unwrap(), Some("4".into()));
        assert_eq!(reopened.load("other").unwrap(), Some("x".into()));
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(&dir.path().join("nested")).unwrap();
        assert_eq!(store.load("anything").unwrap(), None);
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::in_dir(dir.path()).unwrap();
        store.save("a", "1").unwrap();
        store.save("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.load("a").unwrap(), None);
        assert_eq!(store.load("b").unwrap(), Some("2".into()));
    }

    #[test]
    fn test_corrupt_file_is_a_load_error_but_save_recovers() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::in_dir(dir.path()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load("a"),
            Err(StorageError::Deserialization(_))
        ));
        store.save("a", "1").unwrap();
        assert_eq!(store.load("a").unwrap(), Some("1".into()));
    }

    #[test]
    fn test_unreadable_file_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::in_dir(dir.path()).unwrap();
        let garbage = [0xff, 0xfe, 0x00, 0x80];
        fs::write(store.path(), garbage).unwrap();

        assert!(matches!(store.save("a", "1"), Err(StorageError::Io(_))));
        assert!(matches!(store.remove("a"), Err(StorageError::Io(_))));
        assert_eq!(fs::read(store.path()).unwrap(), garbage);
    }
}
