use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::repository::Storage;

use crate::Clock;
use crate::bank_service::QuestionBankService;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::identity_service::IdentityService;
use crate::question_source::BundledQuestionSource;
use crate::quiz::QuizService;
use crate::theme_service::ThemeService;

/// Assembles app-facing services over one store.
#[derive(Clone)]
pub struct AppServices {
    identity: Arc<IdentityService>,
    theme: Arc<ThemeService>,
    bank: Arc<QuestionBankService>,
    history: Arc<HistoryService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: QuizSettings,
        bundle: Option<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, settings, bundle))
    }

    #[must_use]
    pub fn in_memory(clock: Clock, settings: QuizSettings) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, settings, None)
    }

    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        settings: QuizSettings,
        bundle: Option<PathBuf>,
    ) -> Self {
        let store = Arc::clone(&storage.store);
        let bank = Arc::new(QuestionBankService::new(Arc::clone(&store)));
        let history = Arc::new(HistoryService::new(Arc::clone(&store)));
        let source = Arc::new(BundledQuestionSource::new(Arc::clone(&bank)).with_bundle(bundle));
        let quiz = Arc::new(QuizService::new(
            clock,
            settings,
            source,
            Arc::clone(&history),
        ));

        Self {
            identity: Arc::new(IdentityService::new(Arc::clone(&store))),
            theme: Arc::new(ThemeService::new(store)),
            bank,
            history,
            quiz,
        }
    }

    #[must_use]
    pub fn identity(&self) -> Arc<IdentityService> {
        Arc::clone(&self.identity)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
