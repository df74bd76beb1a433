//! Key-value storage backing the persisted state blob.

mod json_file_store;
mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use nexa_core::error::Result;

/// Durable string storage addressed by record name.
///
/// Implementations are synchronous; callers in async contexts move them onto
/// the blocking pool.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the record does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the record atomically.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the record. Deleting a missing record is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
