#![forbid(unsafe_code)]

//! Key-value preference storage.
//!
//! The site persists exactly one string (the theme name). [`PreferenceStore`]
//! is the seam: the browser backend maps it onto `localStorage`,
//! [`MemoryStore`] serves tests and hosts without persistence, and
//! [`FileStore`] keeps a flat JSON object on disk for native hosts.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from a [`PreferenceStore`].
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing data was not a JSON object of strings.
    Serialization(String),
    /// The platform store is missing or refused access.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "preference storage I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "preference storage is corrupt: {msg}"),
            Self::Unavailable(msg) => write!(f, "preference storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// String preferences by key.
pub trait PreferenceStore {
    /// `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Preferences in a JSON object file.
///
/// The file is read on every access and rewritten on every change. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("portfolio-theme").unwrap(), None);
        store.set("portfolio-theme", "light").unwrap();
        assert_eq!(store.get("portfolio-theme").unwrap().as_deref(), Some("light"));
        store.remove("portfolio-theme").unwrap();
        assert!(store.is_empty());
        store.remove("portfolio-theme").unwrap();
    }

    #[test]
    fn memory_store_seeded() {
        let store = MemoryStore::with_entry("k", "v");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get("portfolio-theme").unwrap(), None);
        store.remove("portfolio-theme").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        FileStore::new(&path).set("portfolio-theme", "light").unwrap();
        FileStore::new(&path).set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("portfolio-theme").unwrap().as_deref(), Some("light"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));

        reopened.remove("other").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("portfolio-theme"));
        assert!(!text.contains("other"));
    }

    #[test]
    fn file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = FileStore::new(&path).get("portfolio-theme").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn io_error_has_source() {
        let err = StorageError::from(io::Error::other("denied"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&StorageError::Unavailable("x".into())).is_none());
    }
}
