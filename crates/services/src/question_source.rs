//! Where a quiz gets its questions from.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use quiz_core::model::{BucketKey, Question, QuestionBank};

use crate::bank_service::{QuestionBankService, read_bank_file};

/// Supplies the questions of one bucket, in bank order.
///
/// Loading never fails: sources fall back to whatever local questions they
/// have and an empty list means "no questions for this bucket".
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn load(&self, key: &BucketKey) -> Vec<Question>;
}

/// Reads an optional bundle file, falling back to the local bank.
#[derive(Clone)]
pub struct BundledQuestionSource {
    bundle: Option<PathBuf>,
    bank: Arc<QuestionBankService>,
}

impl BundledQuestionSource {
    #[must_use]
    pub fn new(bank: Arc<QuestionBankService>) -> Self {
        Self { bundle: None, bank }
    }

    #[must_use]
    pub fn with_bundle(mut self, path: Option<PathBuf>) -> Self {
        self.bundle = path;
        self
    }

    async fn read_bundle(&self) -> Option<QuestionBank> {
        let path = self.bundle.as_ref()?;
        match read_bank_file(path).await {
            Ok(bank) => Some(bank),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "question bundle unavailable, using local questions"
                );
                None
            }
        }
    }
}

#[async_trait]
impl QuestionSource for BundledQuestionSource {
    async fn load(&self, key: &BucketKey) -> Vec<Question> {
        if let Some(bundle) = self.read_bundle().await {
            return bundle.questions(key).to_vec();
        }
        match self.bank.current().await {
            Ok(bank) => bank.questions(key).to_vec(),
            Err(err) => {
                tracing::warn!(error = %err, "question bank unavailable, using built-in questions");
                self.bank.defaults().questions(key).to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, Topic};
    use storage::repository::InMemoryStore;

    fn source(bundle: Option<PathBuf>) -> BundledQuestionSource {
        let bank = Arc::new(QuestionBankService::new(Arc::new(InMemoryStore::new())));
        BundledQuestionSource::new(bank).with_bundle(bundle)
    }

    fn key(topic: &str, difficulty: Difficulty) -> BucketKey {
        BucketKey::topical(Topic::new(topic).unwrap(), difficulty)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quiz-source-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn without_bundle_reads_the_local_bank() {
        let questions = source(None).load(&key("nodejs", Difficulty::Easy)).await;
        assert_eq!(questions.len(), 3);
    }

    #[tokio::test]
    async fn unknown_bucket_is_empty() {
        let questions = source(None).load(&key("cobol", Difficulty::Hard)).await;
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn missing_bundle_falls_back() {
        let src = source(Some(temp_path("missing.json")));
        assert_eq!(src.load(&key("laravel", Difficulty::Easy)).await.len(), 2);
    }

    #[tokio::test]
    async fn bundle_wins_when_readable() {
        let path = temp_path("bundle.json");
        std::fs::write(
            &path,
            r#"{ "rust": { "easy": [
                { "id": 1, "question": "Q?", "options": ["a", "b"], "answer": "a" }
            ] } }"#,
        )
        .unwrap();

        let src = source(Some(path.clone()));
        assert_eq!(src.load(&key("rust", Difficulty::Easy)).await.len(), 1);
        assert!(src.load(&key("nodejs", Difficulty::Easy)).await.is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn malformed_bundle_falls_back() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{").unwrap();
        let src = source(Some(path.clone()));
        assert_eq!(src.load(&key("nodejs", Difficulty::Medium)).await.len(), 2);
        std::fs::remove_file(path).unwrap();
    }
}
