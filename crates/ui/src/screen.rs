//! Which screen is showing, and how the user moves between screens.

use quiz_core::model::{BucketKey, Difficulty, HistoryEntry, Topic};

/// Each variant carries exactly the data its screen needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Topics,
    /// `None` picks from the bank's topic-less buckets.
    Difficulty { topic: Option<Topic> },
    Quiz { key: BucketKey },
    Results { entry: HistoryEntry },
    Review { entry: HistoryEntry },
}

impl Screen {
    /// First screen on launch.
    #[must_use]
    pub fn resume(logged_in: bool) -> Self {
        if logged_in { Screen::Topics } else { Screen::Login }
    }

    #[must_use]
    pub fn after_login(&self) -> Self {
        match self {
            Screen::Login => Screen::Topics,
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn logout(&self) -> Self {
        Screen::Login
    }

    #[must_use]
    pub fn pick_topic(&self, topic: Option<Topic>) -> Self {
        match self {
            Screen::Topics => Screen::Difficulty { topic },
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn start_quiz(&self, difficulty: Difficulty) -> Self {
        match self {
            Screen::Difficulty { topic } => Screen::Quiz {
                key: BucketKey::new(topic.clone(), difficulty),
            },
            other => other.clone(),
        }
    }

    /// The chosen bucket had no questions; go back to picking one.
    #[must_use]
    pub fn quiz_unavailable(&self) -> Self {
        match self {
            Screen::Quiz { key } => Screen::Difficulty {
                topic: key.topic.clone(),
            },
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn quiz_completed(&self, entry: HistoryEntry) -> Self {
        match self {
            Screen::Quiz { .. } => Screen::Results { entry },
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn review(&self) -> Self {
        match self {
            Screen::Results { entry } => Screen::Review {
                entry: entry.clone(),
            },
            other => other.clone(),
        }
    }

    /// Replay the bucket of a finished quiz.
    #[must_use]
    pub fn play_again(&self) -> Self {
        match self {
            Screen::Results { entry } => Screen::Quiz {
                key: entry.key().clone(),
            },
            other => other.clone(),
        }
    }

    /// One step up. Leaving a quiz abandons it without recording history.
    #[must_use]
    pub fn back(&self) -> Self {
        match self {
            Screen::Login | Screen::Topics => self.clone(),
            Screen::Difficulty { .. } => Screen::Topics,
            Screen::Quiz { key } => Screen::Difficulty {
                topic: key.topic.clone(),
            },
            Screen::Results { entry } => Screen::Difficulty {
                topic: entry.topic().cloned(),
            },
            Screen::Review { entry } => Screen::Results {
                entry: entry.clone(),
            },
        }
    }

    #[must_use]
    pub fn home(&self) -> Self {
        match self {
            Screen::Login => Screen::Login,
            _ => Screen::Topics,
        }
    }

    /// The quiz screen owns a running timer.
    #[must_use]
    pub fn is_quiz(&self) -> bool {
        matches!(self, Screen::Quiz { .. })
    }
}
