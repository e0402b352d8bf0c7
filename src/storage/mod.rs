//! Host persistence for the trainer
//!
//! The engine only needs a string key/value capability. Failures are
//! reported here and swallowed by the callers in `training`.

use std::sync::Arc;

mod file_storage;
mod memory;

pub use file_storage::{FileStorage, Result, StorageError};
pub use memory::MemoryStorage;

/// Minimal persistence capability supplied by the host
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + Sync> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
