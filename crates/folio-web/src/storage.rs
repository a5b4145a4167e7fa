#![forbid(unsafe_code)]

//! `localStorage` behind [`PreferenceStore`].

use folio_runtime::storage::{PreferenceStore, StorageError};
use web_sys::{Storage, Window};

use crate::error::{WebError, js_message};

/// The page's `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Fails when storage is disabled (private browsing, sandboxed frames).
    pub fn new(window: &Window) -> Result<Self, StorageError> {
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?
            .ok_or(WebError::MissingGlobal("localStorage"))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(js_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(js_message(&e)))
    }
}
