mod bank;
mod builtin;
mod history;
mod key;
mod profile;
mod question;
mod settings;

pub use bank::{BankEntry, QuestionBank, QuestionBankError};
pub use history::{AnalyticsLog, HistoryEntry, HistoryEntryRecord, HistoryError};
pub use key::{BucketKey, Difficulty, DifficultyError, Topic, TopicError};
pub use profile::{Theme, UserName, UserNameError};
pub use question::{AnsweredQuestion, Question, QuestionError};
pub use settings::{QuizSettings, QuizSettingsError};
