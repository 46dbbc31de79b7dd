use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::key::{BucketKey, Difficulty, Topic};
use super::question::AnsweredQuestion;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("score ({score}) exceeds total questions ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Wire shape of a history entry inside the analytics document.
///
/// Older documents name the topic `language`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryRecord {
    pub date: DateTime<Utc>,
    #[serde(default, alias = "language", skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    pub difficulty: Difficulty,
    pub score: u32,
    pub total_questions: u32,
    #[serde(rename = "timeTaken")]
    pub time_taken_secs: u64,
    #[serde(default)]
    pub answered_questions: Vec<AnsweredQuestion>,
}

/// One completed quiz session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistoryEntryRecord", into = "HistoryEntryRecord")]
pub struct HistoryEntry {
    date: DateTime<Utc>,
    key: BucketKey,
    score: u32,
    total_questions: u32,
    time_taken_secs: u64,
    answered_questions: Vec<AnsweredQuestion>,
}

impl HistoryEntry {
    /// # Errors
    ///
    /// Returns `HistoryError::ScoreExceedsTotal` if `score > total_questions`.
    pub fn new(
        date: DateTime<Utc>,
        key: BucketKey,
        score: u32,
        total_questions: u32,
        time_taken_secs: u64,
        answered_questions: Vec<AnsweredQuestion>,
    ) -> Result<Self, HistoryError> {
        if score > total_questions {
            return Err(HistoryError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        Ok(Self::from_parts(
            date,
            key,
            score,
            total_questions,
            time_taken_secs,
            answered_questions,
        ))
    }

    /// Caller guarantees `score <= total_questions`.
    pub(crate) fn from_parts(
        date: DateTime<Utc>,
        key: BucketKey,
        score: u32,
        total_questions: u32,
        time_taken_secs: u64,
        answered_questions: Vec<AnsweredQuestion>,
    ) -> Self {
        Self {
            date,
            key,
            score,
            total_questions,
            time_taken_secs,
            answered_questions,
        }
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn key(&self) -> &BucketKey {
        &self.key
    }

    #[must_use]
    pub fn topic(&self) -> Option<&Topic> {
        self.key.topic.as_ref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.key.difficulty
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> u64 {
        self.time_taken_secs
    }

    #[must_use]
    pub fn answered_questions(&self) -> &[AnsweredQuestion] {
        &self.answered_questions
    }

    /// Score as a whole percentage, rounded; 0 for an empty session.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        let score = u64::from(self.score);
        let total = u64::from(self.total_questions);
        u32::try_from((score * 200 + total) / (total * 2)).unwrap_or(100)
    }
}

impl TryFrom<HistoryEntryRecord> for HistoryEntry {
    type Error = HistoryError;

    fn try_from(record: HistoryEntryRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.date,
            BucketKey::new(record.topic, record.difficulty),
            record.score,
            record.total_questions,
            record.time_taken_secs,
            record.answered_questions,
        )
    }
}

impl From<HistoryEntry> for HistoryEntryRecord {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            date: entry.date,
            topic: entry.key.topic,
            difficulty: entry.key.difficulty,
            score: entry.score,
            total_questions: entry.total_questions,
            time_taken_secs: entry.time_taken_secs,
            answered_questions: entry.answered_questions,
        }
    }
}

/// The persisted analytics document. Derived statistics are never stored
/// here; a legacy `stats` field is ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsLog {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}
