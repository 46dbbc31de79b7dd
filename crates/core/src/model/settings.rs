use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("time limit must be between 1 and 86400 seconds")]
    InvalidTimeLimit,

    #[error("answer reveal delay must be at most 10000 ms")]
    InvalidRevealDelay,
}

/// Per-run knobs for the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit_secs: u32,
    answer_reveal_ms: u64,
}

impl QuizSettings {
    pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;
    pub const DEFAULT_ANSWER_REVEAL_MS: u64 = 1_000;

    /// # Errors
    ///
    /// Returns `QuizSettingsError` when either value is out of range.
    pub fn new(time_limit_secs: u32, answer_reveal_ms: u64) -> Result<Self, QuizSettingsError> {
        if !(1..=86_400).contains(&time_limit_secs) {
            return Err(QuizSettingsError::InvalidTimeLimit);
        }
        if answer_reveal_ms > 10_000 {
            return Err(QuizSettingsError::InvalidRevealDelay);
        }
        Ok(Self {
            time_limit_secs,
            answer_reveal_ms,
        })
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn answer_reveal_ms(&self) -> u64 {
        self.answer_reveal_ms
    }

    #[must_use]
    pub fn answer_reveal(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.answer_reveal_ms).unwrap_or(i64::MAX))
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: Self::DEFAULT_TIME_LIMIT_SECS,
            answer_reveal_ms: Self::DEFAULT_ANSWER_REVEAL_MS,
        }
    }
}
