use super::Storage;
use crate::error::PersistenceError;

/// Browser LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| PersistenceError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| PersistenceError::Backend(format!("{e:?}")))
    }
}
