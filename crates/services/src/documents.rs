//! Typed access to the JSON documents kept in the key-value store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use storage::repository::{KeyValueStore, StorageError, StoreKey};

/// Read and decode one stored document.
///
/// Missing entries, unparsable text and JSON of the wrong shape all load as
/// `None`; only adapter failures are returned as errors.
pub(crate) async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StoreKey,
) -> Result<Option<T>, StorageError> {
    let value = match store.get(key).await {
        Ok(Some(value)) => value,
        Ok(None) => return Ok(None),
        Err(StorageError::Serialization(reason)) => {
            tracing::warn!(%key, %reason, "ignoring unreadable stored entry");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    match serde_json::from_value(value) {
        Ok(doc) => Ok(Some(doc)),
        Err(err) => {
            tracing::warn!(%key, error = %err, "ignoring malformed stored entry");
            Ok(None)
        }
    }
}

pub(crate) async fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: StoreKey,
    doc: &T,
) -> Result<(), StorageError> {
    let value =
        serde_json::to_value(doc).map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &value).await
}
