//! Durable key-value storage the policy store persists through
//!
//! Every `set` replaces the whole value of its key in one step: a reader
//! sees either the previous value or the new one, never a partial write.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::utils::StoreError;
use serde_json::Value;

/// Key-value collaborator backing the policy store
pub trait KeyValueStore {
    /// Load the value stored under `key`, `None` if unset
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Atomically replace the value stored under `key`
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}
