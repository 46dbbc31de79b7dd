use quiz_core::analytics::{AnalyticsSummary, BucketStats};
use quiz_core::model::{Difficulty, HistoryEntry, QuestionBank, Topic};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicVm {
    pub topic: Option<Topic>,
    pub label: String,
}

/// Topics in bank order, then a "General" entry for topic-less buckets.
#[must_use]
pub fn map_topics(bank: &QuestionBank) -> Vec<TopicVm> {
    let mut topics: Vec<TopicVm> = bank
        .topics()
        .map(|topic| TopicVm {
            topic: Some(topic.clone()),
            label: topic.display_name(),
        })
        .collect();
    if bank.has_untopical() {
        topics.push(TopicVm {
            topic: None,
            label: "General".to_owned(),
        });
    }
    topics
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyStatsVm {
    pub difficulty: Difficulty,
    pub label: &'static str,
    pub accuracy: String,
    pub avg_time: String,
}

impl DifficultyStatsVm {
    fn new(difficulty: Difficulty, stats: BucketStats) -> Self {
        Self {
            difficulty,
            label: difficulty.label(),
            accuracy: format!("{:.0}%", stats.accuracy),
            avg_time: format!("{:.0}s", stats.avg_time_secs),
        }
    }
}

#[must_use]
pub fn map_topic_stats(summary: &AnalyticsSummary, topic: Option<&Topic>) -> Vec<DifficultyStatsVm> {
    summary
        .topic_stats(topic)
        .into_iter()
        .map(|(difficulty, stats)| DifficultyStatsVm::new(difficulty, stats))
        .collect()
}

/// Accuracy per difficulty pooled over every topic.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn map_overall_accuracy(history: &[HistoryEntry]) -> Vec<DifficultyStatsVm> {
    Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            let (mut correct, mut total, mut secs, mut sessions) = (0u64, 0u64, 0u64, 0u64);
            for entry in history.iter().filter(|e| e.difficulty() == difficulty) {
                correct += u64::from(entry.score());
                total += u64::from(entry.total_questions());
                secs += entry.time_taken_secs();
                sessions += 1;
            }
            let stats = BucketStats {
                accuracy: if total > 0 {
                    correct as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
                avg_time_secs: if sessions > 0 {
                    secs as f64 / sessions as f64
                } else {
                    0.0
                },
            };
            DifficultyStatsVm::new(difficulty, stats)
        })
        .collect()
}
