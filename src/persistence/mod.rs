//! Key-value persistence
//!
//! The game stores a single scalar (the best score) and reads its config
//! documents through the same interface. Writes are fire-and-forget: callers
//! log failures and carry on.

mod memory;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::error::PersistenceError;

/// String key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}
