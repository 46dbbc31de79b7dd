//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{HistoryEntry, UserNameError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuestionBankService` and the question source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("malformed question file: {0}")]
    Malformed(String),
    #[error("could not encode question bank: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `HistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `IdentityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    InvalidName(#[from] UserNameError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ThemeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThemeError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// The session finished but its history entry could not be persisted.
    #[error("quiz finished but history was not saved: {source}")]
    NotSaved {
        entry: Box<HistoryEntry>,
        #[source]
        source: HistoryServiceError,
    },
}

impl QuizError {
    /// The finished session carried by the error, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&HistoryEntry> {
        match self {
            QuizError::NotSaved { entry, .. } => Some(entry),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
