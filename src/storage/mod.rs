pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Typed key-value persistence seam.
///
/// Every value is a full JSON document: callers read the whole document,
/// mutate a local copy and write the whole document back. There is no
/// incremental update and no cross-call locking; last write wins.
pub trait KvStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever
    /// stored there.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
