use thiserror::Error;

use crate::model::{
    DifficultyError, HistoryError, QuestionBankError, QuestionError, QuizSettingsError,
    TopicError, UserNameError,
};

/// Umbrella error for callers that only need to report a domain failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] QuestionBankError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    UserName(#[from] UserNameError),
}
