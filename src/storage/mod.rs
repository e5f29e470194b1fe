//! Persistence adapter for wizard progress

mod file_store;
mod memory_store;
mod progress;
mod traits;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use progress::{ProgressStore, ANSWERS_KEY, BACKUP_KEY, STEP_KEY};
pub use traits::KeyValueStore;

#[cfg(test)]
pub use traits::MockKeyValueStore;

/// Error types for the key/value store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("no data directory available")]
    NoDataDir,
}
