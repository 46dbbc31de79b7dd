use std::sync::Arc;

use quiz_core::analytics::{AnalyticsSummary, summarize};
use quiz_core::model::{AnalyticsLog, HistoryEntry};
use storage::repository::{KeyValueStore, StoreKey};

use crate::documents;
use crate::error::HistoryServiceError;

/// Append-only log of finished sessions and the stats derived from it.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Every recorded session, oldest first. A corrupt log reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the store cannot be read.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, HistoryServiceError> {
        Ok(self.log().await?.history)
    }

    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the log cannot be written.
    pub async fn record(&self, entry: HistoryEntry) -> Result<(), HistoryServiceError> {
        let mut log = self.log().await?;
        tracing::info!(
            key = %entry.key(),
            score = entry.score(),
            total = entry.total_questions(),
            "recording quiz result"
        );
        log.history.push(entry);
        documents::save(self.store.as_ref(), StoreKey::Analytics, &log).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the store cannot be read.
    pub async fn summary(&self) -> Result<AnalyticsSummary, HistoryServiceError> {
        Ok(summarize(&self.history().await?))
    }

    async fn log(&self) -> Result<AnalyticsLog, HistoryServiceError> {
        Ok(documents::load(self.store.as_ref(), StoreKey::Analytics)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{BucketKey, Difficulty, Topic};
    use quiz_core::time::fixed_now;
    use storage::repository::InMemoryStore;

    fn entry(score: u32, total: u32, secs: u64) -> HistoryEntry {
        let key = BucketKey::topical(Topic::new("nodejs").unwrap(), Difficulty::Easy);
        HistoryEntry::new(fixed_now(), key, score, total, secs, Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn records_append_in_order() {
        let svc = HistoryService::new(Arc::new(InMemoryStore::new()));
        svc.record(entry(1, 3, 10)).await.unwrap();
        svc.record(entry(3, 3, 20)).await.unwrap();

        let history = svc.history().await.unwrap();
        assert_eq!(history, vec![entry(1, 3, 10), entry(3, 3, 20)]);
    }

    #[tokio::test]
    async fn summary_pools_recorded_sessions() {
        let svc = HistoryService::new(Arc::new(InMemoryStore::new()));
        svc.record(entry(2, 4, 30)).await.unwrap();
        svc.record(entry(3, 6, 50)).await.unwrap();

        let key = BucketKey::topical(Topic::new("nodejs").unwrap(), Difficulty::Easy);
        let stats = svc.summary().await.unwrap().get(&key);
        assert!((stats.accuracy - 50.0).abs() < f64::EPSILON);
        assert!((stats.avg_time_secs - 40.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn corrupt_log_reads_empty_and_is_replaced_on_record() {
        let store = InMemoryStore::new();
        store.set_raw(StoreKey::Analytics, "{\"history\": 3}").unwrap();
        let svc = HistoryService::new(Arc::new(store));

        assert!(svc.history().await.unwrap().is_empty());
        svc.record(entry(1, 1, 5)).await.unwrap();
        assert_eq!(svc.history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reads_logs_written_by_older_builds() {
        let store = InMemoryStore::new();
        store
            .set_raw(
                StoreKey::Analytics,
                r#"{"history": [{"date": "2024-01-01T00:00:00Z", "language": "nodejs",
                    "difficulty": "easy", "score": 2, "totalQuestions": 3, "timeTaken": 42,
                    "answeredQuestions": []}], "stats": {}}"#,
            )
            .unwrap();
        let svc = HistoryService::new(Arc::new(store));
        let history = svc.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].time_taken_secs(), 42);
        assert_eq!(history[0].topic().map(Topic::as_str), Some("nodejs"));
    }
}
