//! Snapshot storage behind the repositories.
//!
//! Collections are persisted as whole JSON-array snapshots under opaque
//! string keys. The backend is injected into each repository so tests run
//! against [`MemoryStore`] and production against [`JsonFileStore`] or a
//! [`RemoteStore`] without the callers changing.

mod json_file;
mod memory;
mod remote;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Key-value snapshot store. `set` replaces the whole value for a key;
/// readers in the same process never observe a partial write.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
