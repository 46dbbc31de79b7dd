use std::path::{Path, PathBuf};
use std::sync::Arc;

use services::{
    AppServices, HistoryService, IdentityService, QuestionBankService, QuizService, ThemeService,
};

/// Services the views need, provided by the composition root.
pub trait UiApp: Send + Sync {
    fn identity(&self) -> Arc<IdentityService>;
    fn theme(&self) -> Arc<ThemeService>;
    fn bank(&self) -> Arc<QuestionBankService>;
    fn history(&self) -> Arc<HistoryService>;
    fn quiz(&self) -> Arc<QuizService>;
}

impl UiApp for AppServices {
    fn identity(&self) -> Arc<IdentityService> {
        AppServices::identity(self)
    }

    fn theme(&self) -> Arc<ThemeService> {
        AppServices::theme(self)
    }

    fn bank(&self) -> Arc<QuestionBankService> {
        AppServices::bank(self)
    }

    fn history(&self) -> Arc<HistoryService> {
        AppServices::history(self)
    }

    fn quiz(&self) -> Arc<QuizService> {
        AppServices::quiz(self)
    }
}

/// File name used by the export button.
pub const EXPORT_FILE_NAME: &str = "questions.json";

#[derive(Clone)]
pub struct AppContext {
    identity: Arc<IdentityService>,
    theme: Arc<ThemeService>,
    bank: Arc<QuestionBankService>,
    history: Arc<HistoryService>,
    quiz: Arc<QuizService>,
    export_dir: PathBuf,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            identity: app.identity(),
            theme: app.theme(),
            bank: app.bank(),
            history: app.history(),
            quiz: app.quiz(),
            export_dir: PathBuf::from("."),
        }
    }

    /// Directory the export button writes into.
    #[must_use]
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    #[must_use]
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(EXPORT_FILE_NAME)
    }

    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
