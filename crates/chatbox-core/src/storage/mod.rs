//! Durable key/value storage for the persisted documents.
//!
//! Values are opaque strings (the callers store JSON). Implementations are
//! synchronous; every write is complete when `set` returns.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
