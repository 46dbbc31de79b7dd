use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::key::{BucketKey, Difficulty, Topic, TopicError};
use super::question::{Question, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("top-level key {0:?} holds a question list but is not a difficulty")]
    UnknownDifficulty(String),

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("{bucket}: {source}")]
    Question {
        bucket: String,
        #[source]
        source: QuestionError,
    },

    #[error("{bucket}: duplicate question id {id}")]
    DuplicateId { bucket: String, id: u32 },

    #[error("top-level key {0:?} appears more than once")]
    DuplicateKey(String),

    #[error("topic {0:?} has the same name as a difficulty bucket")]
    KeyClash(String),
}

/// One top-level value of a bank file: either a whole topic or, for banks
/// without a topic level, the questions of a single difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BankEntry {
    Bucket(Vec<Question>),
    Topic(BTreeMap<Difficulty, Vec<Question>>),
}

/// All questions known to the app, addressed by [`BucketKey`].
///
/// Serializes to the bank file format:
/// `{"nodejs": {"easy": [...]}, "medium": [...]}`. Every bank obtained
/// through deserialization has passed [`QuestionBank::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, BankEntry>",
    into = "BTreeMap<String, BankEntry>"
)]
pub struct QuestionBank {
    topics: BTreeMap<Topic, BTreeMap<Difficulty, Vec<Question>>>,
    untopical: BTreeMap<Difficulty, Vec<Question>>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the questions of one bucket.
    #[must_use]
    pub fn with_bucket(mut self, key: BucketKey, questions: Vec<Question>) -> Self {
        match key.topic {
            Some(topic) => {
                self.evict_bucket_named(&topic);
                self.topics
                    .entry(topic)
                    .or_default()
                    .insert(key.difficulty, questions);
            }
            None => {
                self.topics.remove(key.difficulty.as_str());
                self.untopical.insert(key.difficulty, questions);
            }
        }
        self
    }

    /// Drop the flat bucket whose file key equals `topic`, if any.
    fn evict_bucket_named(&mut self, topic: &Topic) {
        if let Some(difficulty) = Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == topic.as_str())
        {
            self.untopical.remove(&difficulty);
        }
    }

    /// Questions of a bucket in bank order; empty when the key is unknown.
    #[must_use]
    pub fn questions(&self, key: &BucketKey) -> &[Question] {
        let bucket = match &key.topic {
            Some(topic) => self
                .topics
                .get(topic)
                .and_then(|by_difficulty| by_difficulty.get(&key.difficulty)),
            None => self.untopical.get(&key.difficulty),
        };
        bucket.map_or(&[], Vec::as_slice)
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.keys()
    }

    #[must_use]
    pub fn has_untopical(&self) -> bool {
        !self.untopical.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.untopical.is_empty()
    }

    /// Shallow merge: each top-level key of `other` (a topic, or a bare
    /// difficulty) replaces the same key of `self` wholesale, whichever
    /// shape it had before.
    pub fn merge(&mut self, other: QuestionBank) {
        for (topic, by_difficulty) in other.topics {
            self.evict_bucket_named(&topic);
            self.topics.insert(topic, by_difficulty);
        }
        for (difficulty, questions) in other.untopical {
            self.topics.remove(difficulty.as_str());
            self.untopical.insert(difficulty, questions);
        }
    }

    #[must_use]
    pub fn merged(mut self, other: QuestionBank) -> Self {
        self.merge(other);
        self
    }

    /// # Errors
    ///
    /// Returns the first invalid question or duplicate id, labelled with its bucket.
    pub fn validate(&self) -> Result<(), QuestionBankError> {
        for (topic, by_difficulty) in &self.topics {
            for (difficulty, questions) in by_difficulty {
                validate_bucket(&format!("{topic}/{difficulty}"), questions)?;
            }
        }
        for (difficulty, questions) in &self.untopical {
            validate_bucket(difficulty.as_str(), questions)?;
        }
        Ok(())
    }
}

fn validate_bucket(bucket: &str, questions: &[Question]) -> Result<(), QuestionBankError> {
    let mut seen = BTreeSet::new();
    for question in questions {
        question
            .validate()
            .map_err(|source| QuestionBankError::Question {
                bucket: bucket.to_owned(),
                source,
            })?;
        if !seen.insert(question.id()) {
            return Err(QuestionBankError::DuplicateId {
                bucket: bucket.to_owned(),
                id: question.id(),
            });
        }
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, BankEntry>> for QuestionBank {
    type Error = QuestionBankError;

    fn try_from(entries: BTreeMap<String, BankEntry>) -> Result<Self, Self::Error> {
        let mut bank = QuestionBank::new();
        for (key, entry) in entries {
            let replaced = match entry {
                BankEntry::Bucket(questions) => {
                    let difficulty = key
                        .parse::<Difficulty>()
                        .map_err(|_| QuestionBankError::UnknownDifficulty(key.clone()))?;
                    bank.untopical.insert(difficulty, questions).is_some()
                }
                BankEntry::Topic(by_difficulty) => {
                    let topic = Topic::new(key.clone())?;
                    bank.topics.insert(topic, by_difficulty).is_some()
                }
            };
            if replaced {
                return Err(QuestionBankError::DuplicateKey(key));
            }
        }
        if let Some(topic) = bank.topics.keys().find(|topic| {
            bank.untopical
                .keys()
                .any(|difficulty| difficulty.as_str() == topic.as_str())
        }) {
            return Err(QuestionBankError::KeyClash(topic.as_str().to_owned()));
        }
        bank.validate()?;
        Ok(bank)
    }
}

impl From<QuestionBank> for BTreeMap<String, BankEntry> {
    fn from(bank: QuestionBank) -> Self {
        let mut entries: BTreeMap<String, BankEntry> = bank
            .topics
            .into_iter()
            .map(|(topic, by_difficulty)| (String::from(topic), BankEntry::Topic(by_difficulty)))
            .collect();
        for (difficulty, questions) in bank.untopical {
            entries.insert(difficulty.as_str().to_owned(), BankEntry::Bucket(questions));
        }
        entries
    }
}
