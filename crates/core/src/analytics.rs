//! Accuracy and timing statistics folded from the session history.

use std::collections::BTreeMap;

use crate::model::{BucketKey, Difficulty, HistoryEntry, Topic};

/// Raw sums for one bucket. Sums combine associatively, so tallies of
/// separate histories can be merged before computing ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketTally {
    pub correct: u64,
    pub total: u64,
    pub time_secs: u64,
    pub sessions: u64,
}

impl BucketTally {
    fn record(&mut self, entry: &HistoryEntry) {
        self.correct = self.correct.saturating_add(u64::from(entry.score()));
        self.total = self.total.saturating_add(u64::from(entry.total_questions()));
        self.time_secs = self.time_secs.saturating_add(entry.time_taken_secs());
        self.sessions = self.sessions.saturating_add(1);
    }

    #[must_use]
    pub fn combine(self, other: BucketTally) -> BucketTally {
        BucketTally {
            correct: self.correct.saturating_add(other.correct),
            total: self.total.saturating_add(other.total),
            time_secs: self.time_secs.saturating_add(other.time_secs),
            sessions: self.sessions.saturating_add(other.sessions),
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> BucketStats {
        let accuracy = if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };
        let avg_time_secs = if self.sessions > 0 {
            self.time_secs as f64 / self.sessions as f64
        } else {
            0.0
        };
        BucketStats {
            accuracy,
            avg_time_secs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsTally {
    buckets: BTreeMap<BucketKey, BucketTally>,
}

impl AnalyticsTally {
    #[must_use]
    pub fn get(&self, key: &BucketKey) -> BucketTally {
        self.buckets.get(key).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn combine(mut self, other: &AnalyticsTally) -> AnalyticsTally {
        for (key, tally) in &other.buckets {
            let slot = self.buckets.entry(key.clone()).or_default();
            *slot = slot.combine(*tally);
        }
        self
    }

    #[must_use]
    pub fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary {
            buckets: self
                .buckets
                .iter()
                .map(|(key, tally)| (key.clone(), tally.stats()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketStats {
    /// Percentage in `0.0..=100.0`.
    pub accuracy: f64,
    pub avg_time_secs: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    buckets: BTreeMap<BucketKey, BucketStats>,
}

impl AnalyticsSummary {
    /// Stats for a bucket; zero for buckets with no sessions.
    #[must_use]
    pub fn get(&self, key: &BucketKey) -> BucketStats {
        self.buckets.get(key).copied().unwrap_or_default()
    }

    /// Easy, medium and hard stats of one topic (or of the topic-less bank).
    #[must_use]
    pub fn topic_stats(&self, topic: Option<&Topic>) -> [(Difficulty, BucketStats); 3] {
        Difficulty::ALL.map(|difficulty| {
            let key = BucketKey::new(topic.cloned(), difficulty);
            (difficulty, self.get(&key))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &BucketStats)> {
        self.buckets.iter()
    }
}

#[must_use]
pub fn tally(history: &[HistoryEntry]) -> AnalyticsTally {
    let mut out = AnalyticsTally::default();
    for entry in history {
        out.buckets.entry(entry.key().clone()).or_default().record(entry);
    }
    out
}

/// Per-bucket accuracy and average duration over the whole history.
#[must_use]
pub fn summarize(history: &[HistoryEntry]) -> AnalyticsSummary {
    tally(history).summary()
}
