//! Key-value storage scopes.
//!
//! A storage scope maps string keys to string values, the same contract
//! browser local storage offers. Each key holds one complete JSON document
//! and every write replaces the whole value.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::{DeskError, Result};

/// Suffix of the key that keeps an undecodable value aside.
pub const QUARANTINE_SUFFIX: &str = ".corrupt";

/// String key-value storage.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Storage held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage backed by one `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader sees either the previous value or the new one. A file that is not
/// UTF-8 is moved to `<key>.corrupt.json` on read and reported as an error.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open a storage scope rooted at `dir`. The directory is created lazily
    /// on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStorageKey` if the key is empty or contains
    /// characters outside `[A-Za-z0-9._-]`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(DeskError::InvalidStorageKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DeskError::Io(e)),
        };
        trace!(path = %path.display(), bytes = bytes.len(), "read storage item");

        match String::from_utf8(bytes) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) => {
                let quarantine_key = format!("{key}{QUARANTINE_SUFFIX}");
                fs::rename(&path, self.path_for(&quarantine_key)?)?;
                warn!(path = %path.display(), "moved non-UTF-8 storage item aside");
                Err(DeskError::storage(format!(
                    "'{key}' is not valid UTF-8 ({e}); the raw bytes were moved to '{quarantine_key}'"
                )))
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            debug!(dir = %self.dir.display(), "created storage directory");
        }

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        trace!(path = %path.display(), bytes = value.len(), "wrote storage item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeskError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("scope"));

        assert_eq!(storage.get_item("oxy-beaumonde-issues").unwrap(), None);

        storage.set_item("oxy-beaumonde-issues", "[]").unwrap();
        assert_eq!(
            storage.get_item("oxy-beaumonde-issues").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("scope/oxy-beaumonde-issues.json").exists());
        assert!(!dir.path().join("scope/oxy-beaumonde-issues.json.tmp").exists());

        storage.remove_item("oxy-beaumonde-issues").unwrap();
        assert_eq!(storage.get_item("oxy-beaumonde-issues").unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        for key in ["", "../outside", "a/b", ".hidden", "with space"] {
            let result = storage.set_item(key, "x");
            assert!(
                matches!(result, Err(DeskError::InvalidStorageKey { .. })),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_file_storage_moves_non_utf8_aside() {
        let dir = tempfile::tempdir().unwrap();
        let raw: &[u8] = b"[{\"id\":\"OB-1\xff\"}]";
        fs::write(dir.path().join("oxy-beaumonde-issues.json"), raw).unwrap();
        let mut storage = FileStorage::new(dir.path());

        let result = storage.get_item("oxy-beaumonde-issues");
        assert!(matches!(result, Err(DeskError::Storage(_))));
        assert_eq!(
            fs::read(dir.path().join("oxy-beaumonde-issues.corrupt.json")).unwrap(),
            raw
        );
        assert_eq!(storage.get_item("oxy-beaumonde-issues").unwrap(), None);

        storage.set_item("oxy-beaumonde-issues", "[]").unwrap();
        assert_eq!(
            fs::read(dir.path().join("oxy-beaumonde-issues.corrupt.json")).unwrap(),
            raw
        );
    }

    #[test]
    fn test_file_storage_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.remove_item("never-written").unwrap();
    }
}
