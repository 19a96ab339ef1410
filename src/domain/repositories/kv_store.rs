//! Key-value store abstraction backing the link registry.

use async_trait::async_trait;

/// Errors raised by key-value store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A string-to-string store with explicit get/set operations.
///
/// Values are opaque strings; callers own the encoding. Implementations must be
/// safe to share across tasks but are not required to coordinate writers from
/// other processes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process map
/// - [`crate::infrastructure::persistence::FileStore`] - one JSON file per key
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key was never set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
