use std::path::Path;
use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::repository::{KeyValueStore, StoreKey};

use crate::documents;
use crate::error::BankError;

/// Built-in questions plus whatever the user imported.
#[derive(Clone)]
pub struct QuestionBankService {
    store: Arc<dyn KeyValueStore>,
    defaults: QuestionBank,
}

impl QuestionBankService {
    /// Service over the built-in question set.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_defaults(store, QuestionBank::builtin())
    }

    #[must_use]
    pub fn with_defaults(store: Arc<dyn KeyValueStore>, defaults: QuestionBank) -> Self {
        Self { store, defaults }
    }

    #[must_use]
    pub fn defaults(&self) -> &QuestionBank {
        &self.defaults
    }

    /// Defaults with the stored bank merged over them.
    ///
    /// A stored bank that fails validation is ignored.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Storage` if the store cannot be read.
    pub async fn current(&self) -> Result<QuestionBank, BankError> {
        let stored: Option<QuestionBank> =
            documents::load(self.store.as_ref(), StoreKey::Questions).await?;
        Ok(match stored {
            Some(stored) => self.defaults.clone().merged(stored),
            None => self.defaults.clone(),
        })
    }

    /// Parse `text` as a question bank and merge it over the current one.
    ///
    /// Each top-level entry of the import replaces the entry of the same name.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Malformed` if the text is not a valid bank; nothing
    /// is written in that case.
    pub async fn import_json(&self, text: &str) -> Result<QuestionBank, BankError> {
        self.merge_and_save(parse_bank(text)?).await
    }

    async fn merge_and_save(&self, imported: QuestionBank) -> Result<QuestionBank, BankError> {
        let merged = self.current().await?.merged(imported);
        documents::save(self.store.as_ref(), StoreKey::Questions, &merged).await?;
        tracing::info!(topics = merged.topics().count(), "questions imported");
        Ok(merged)
    }

    /// # Errors
    ///
    /// Returns `BankError::Io` if the file cannot be read, otherwise as
    /// [`Self::import_json`].
    pub async fn import_file(&self, path: &Path) -> Result<QuestionBank, BankError> {
        let imported = read_bank_file(path).await?;
        self.merge_and_save(imported).await
    }

    /// The current bank as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bank cannot be read or encoded.
    pub async fn export_json(&self) -> Result<String, BankError> {
        let bank = self.current().await?;
        serde_json::to_string_pretty(&bank).map_err(BankError::Encode)
    }

    /// # Errors
    ///
    /// Returns `BankError::Io` if the file cannot be written.
    pub async fn export_to(&self, path: &Path) -> Result<(), BankError> {
        let json = self.export_json().await?;
        tokio::fs::write(path, json).await?;
        tracing::info!(path = %path.display(), "questions exported");
        Ok(())
    }
}

fn parse_bank(text: &str) -> Result<QuestionBank, BankError> {
    serde_json::from_str(text).map_err(|e| BankError::Malformed(e.to_string()))
}

pub(crate) async fn read_bank_file(path: &Path) -> Result<QuestionBank, BankError> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_bank(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{BucketKey, Difficulty, Topic};
    use storage::repository::InMemoryStore;

    fn service() -> (QuestionBankService, InMemoryStore) {
        let store = InMemoryStore::new();
        (QuestionBankService::new(Arc::new(store.clone())), store)
    }

    fn nodejs(difficulty: Difficulty) -> BucketKey {
        BucketKey::topical(Topic::new("nodejs").unwrap(), difficulty)
    }

    const RUST_EASY: &str = r#"{
        "rust": {
            "easy": [
                { "id": 1, "question": "Q?", "options": ["a", "b"], "answer": "a" }
            ]
        }
    }"#;

    #[tokio::test]
    async fn fresh_bank_is_the_builtin_set() {
        let (svc, _) = service();
        assert_eq!(svc.current().await.unwrap(), QuestionBank::builtin());
    }

    #[tokio::test]
    async fn import_adds_a_topic_and_keeps_the_rest() {
        let (svc, store) = service();
        let merged = svc.import_json(RUST_EASY).await.unwrap();

        let rust = BucketKey::topical(Topic::new("rust").unwrap(), Difficulty::Easy);
        assert_eq!(merged.questions(&rust).len(), 1);
        assert_eq!(
            merged.questions(&nodejs(Difficulty::Easy)),
            QuestionBank::builtin().questions(&nodejs(Difficulty::Easy))
        );
        assert!(store.get_raw(StoreKey::Questions).unwrap().is_some());
        assert_eq!(svc.current().await.unwrap(), merged);
    }

    #[tokio::test]
    async fn import_replaces_a_whole_topic() {
        let (svc, _) = service();
        let text = r#"{ "nodejs": { "hard": [
            { "id": 9, "question": "Only?", "options": ["x", "y"], "answer": "y" }
        ] } }"#;
        let merged = svc.import_json(text).await.unwrap();
        assert!(merged.questions(&nodejs(Difficulty::Easy)).is_empty());
        assert_eq!(merged.questions(&nodejs(Difficulty::Hard)).len(), 1);
    }

    #[tokio::test]
    async fn malformed_import_leaves_store_untouched() {
        let (svc, store) = service();
        let err = svc.import_json("not json").await.unwrap_err();
        assert!(matches!(err, BankError::Malformed(_)));

        let bad_answer = r#"{ "rust": { "easy": [
            { "id": 1, "question": "Q?", "options": ["a", "b"], "answer": "c" }
        ] } }"#;
        assert!(matches!(
            svc.import_json(bad_answer).await.unwrap_err(),
            BankError::Malformed(_)
        ));
        assert_eq!(store.get_raw(StoreKey::Questions).unwrap(), None);
    }

    #[tokio::test]
    async fn import_with_colliding_keys_is_rejected_whole() {
        let (svc, store) = service();
        let trimmed_twice = r#"{
            "rust": { "easy": [ { "id": 1, "question": "Q?", "options": ["a", "b"], "answer": "a" } ] },
            "rust ": { "hard": [ { "id": 2, "question": "R?", "options": ["a", "b"], "answer": "b" } ] }
        }"#;
        let topic_as_bucket = r#"{
            " easy": { "hard": [ { "id": 1, "question": "Q?", "options": ["a", "b"], "answer": "a" } ] },
            "easy": [ { "id": 2, "question": "R?", "options": ["a", "b"], "answer": "b" } ]
        }"#;

        for text in [trimmed_twice, topic_as_bucket] {
            assert!(matches!(
                svc.import_json(text).await.unwrap_err(),
                BankError::Malformed(_)
            ));
        }
        assert_eq!(store.get_raw(StoreKey::Questions).unwrap(), None);
        assert_eq!(svc.current().await.unwrap(), QuestionBank::builtin());
    }

    #[tokio::test]
    async fn topic_import_replaces_a_flat_bucket_of_that_name() {
        let (svc, _) = service();
        svc.import_json(
            r#"{ "easy": [ { "id": 1, "question": "Q?", "options": ["a", "b"], "answer": "a" } ] }"#,
        )
        .await
        .unwrap();

        let merged = svc
            .import_json(
                r#"{ "easy": { "hard": [ { "id": 2, "question": "R?", "options": ["a", "b"], "answer": "b" } ] } }"#,
            )
            .await
            .unwrap();

        assert!(merged.questions(&BucketKey::untopical(Difficulty::Easy)).is_empty());
        let easy_topic = BucketKey::topical(Topic::new("easy").unwrap(), Difficulty::Hard);
        assert_eq!(merged.questions(&easy_topic).len(), 1);
        assert_eq!(svc.current().await.unwrap(), merged);
    }

    #[tokio::test]
    async fn export_is_pretty_and_reimportable() {
        let (svc, _) = service();
        svc.import_json(RUST_EASY).await.unwrap();
        let json = svc.export_json().await.unwrap();
        assert!(json.contains("\n  \""));

        let (other, _) = service();
        let reimported = other.import_json(&json).await.unwrap();
        assert_eq!(reimported, svc.current().await.unwrap());
    }

    #[tokio::test]
    async fn corrupted_stored_bank_falls_back_to_defaults() {
        let (svc, store) = service();
        store.set_raw(StoreKey::Questions, "{\"rust\": 5}").unwrap();
        assert_eq!(svc.current().await.unwrap(), QuestionBank::builtin());
    }
}
