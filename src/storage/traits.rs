//! Trait abstraction for the key/value store to enable mocking in tests

use super::StorageError;

/// String key/value persistence, in the manner of browser local storage.
///
/// Absent keys are `Ok(None)`, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send {
    /// Store a value, replacing any previous one
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read a value
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Delete a key; deleting a missing key succeeds
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
