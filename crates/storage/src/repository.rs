use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The fixed set of entries the app persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    User,
    Questions,
    Analytics,
    Theme,
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] = [
        StoreKey::User,
        StoreKey::Questions,
        StoreKey::Analytics,
        StoreKey::Theme,
    ];

    /// Name of the entry in the backing store.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StoreKey::User => "quizUser",
            StoreKey::Questions => "quizQuestions",
            StoreKey::Analytics => "quizAnalytics",
            StoreKey::Theme => "theme",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Local key-value persistence. Values are JSON documents.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored text is not JSON,
    /// or `StorageError::Connection` if the backend fails.
    async fn get(&self, key: StoreKey) -> Result<Option<Value>, StorageError>;

    /// Create or replace an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be written.
    async fn set(&self, key: StoreKey, value: &Value) -> Result<(), StorageError>;

    /// Delete an entry. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn remove(&self, key: StoreKey) -> Result<(), StorageError>;
}

pub(crate) fn parse_stored(key: StoreKey, raw: &str) -> Result<Value, StorageError> {
    serde_json::from_str(raw)
        .map_err(|err| StorageError::Serialization(format!("{key}: {err}")))
}

/// In-memory store for tests and prototyping.
///
/// Entries are kept as raw text so tests can plant malformed documents.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<StoreKey, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text without validating it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn set_raw(&self, key: StoreKey, raw: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, raw.into());
        Ok(())
    }

    /// Raw text of an entry, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: StoreKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: StoreKey) -> Result<Option<Value>, StorageError> {
        self.get_raw(key)?
            .map(|raw| parse_stored(key, &raw))
            .transpose()
    }

    async fn set(&self, key: StoreKey, value: &Value) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.set_raw(key, raw)
    }

    async fn remove(&self, key: StoreKey) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

/// The store handed to services, behind a trait object for backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub store: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}
