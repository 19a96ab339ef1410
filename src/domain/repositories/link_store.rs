//! Repository for the persisted link collection.

use std::sync::Arc;

use tracing::debug;

use super::kv_store::{KeyValueStore, StoreError};
use crate::domain::entities::LinkRecord;

/// Default key under which the collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "urlData";

/// Loads and saves the whole link collection under a single store key.
///
/// The collection is stored as a JSON array in creation order. A missing or
/// empty value is an empty collection; an unparseable value is an error and is
/// never silently replaced.
pub struct LinkStore<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
    key: String,
}

impl<S: KeyValueStore + ?Sized> LinkStore<S> {
    pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads every record in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is not a valid
    /// collection, or the backend error if it cannot be read.
    pub async fn load_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<LinkRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: self.key.clone(),
                source,
            })?;

        debug!(key = %self.key, count = records.len(), "Loaded link collection");
        Ok(records)
    }

    /// Writes the full collection back, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    pub async fn save_all(&self, records: &[LinkRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(StoreError::Serialize)?;
        self.store.set(&self.key, &raw).await?;

        debug!(key = %self.key, count = records.len(), "Saved link collection");
        Ok(())
    }
}
