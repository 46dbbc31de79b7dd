use std::sync::Arc;

use quiz_core::model::{BucketKey, HistoryEntry, QuizSettings};
use quiz_core::session::{AnswerOutcome, QuizCompletion, QuizSession, QuizStart};

use crate::Clock;
use crate::error::QuizError;
use crate::history_service::HistoryService;
use crate::question_source::QuestionSource;
use crate::randomizer::shuffled;

/// What the caller should do after driving the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Continue,
    /// The session just finished and its entry was appended to history.
    Completed(HistoryEntry),
}

/// Starts sessions and persists them when they finish.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    settings: QuizSettings,
    source: Arc<dyn QuestionSource>,
    history: Arc<HistoryService>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: QuizSettings,
        source: Arc<dyn QuestionSource>,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            clock,
            settings,
            source,
            history,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Same service reading time from another clock.
    #[must_use]
    pub fn with_clock(&self, clock: Clock) -> Self {
        Self {
            clock,
            ..self.clone()
        }
    }

    /// Load the bucket, shuffle it and start a session.
    pub async fn start(&self, key: BucketKey) -> QuizStart {
        let questions = shuffled(&self.source.load(&key).await);
        let start = QuizSession::start(key, questions, &self.settings, self.clock.now());
        match &start {
            QuizStart::Ready(session) => tracing::info!(
                key = %session.key(),
                questions = session.question_count(),
                time_limit_secs = self.settings.time_limit_secs(),
                "quiz started"
            ),
            QuizStart::Unavailable(key) => {
                tracing::info!(%key, "no questions available for quiz");
            }
        }
        start
    }

    #[must_use]
    pub fn submit(&self, session: &mut QuizSession, option: &str) -> AnswerOutcome {
        session.submit_answer(option, self.clock.now())
    }

    /// Engine step for a revealed answer whose delay has elapsed.
    #[must_use]
    pub fn advance_now(&self, session: &mut QuizSession) -> Option<QuizCompletion> {
        session.advance(self.clock.now())
    }

    /// Engine step for one countdown second.
    #[must_use]
    pub fn tick_now(&self, session: &mut QuizSession) -> Option<QuizCompletion> {
        session.tick(self.clock.now())
    }

    /// [`Self::advance_now`], recording the session if it just finished.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotSaved` if the session finished but could not be
    /// recorded.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<QuizStep, QuizError> {
        match self.advance_now(session) {
            Some(completion) => self.complete(completion).await.map(QuizStep::Completed),
            None => Ok(QuizStep::Continue),
        }
    }

    /// [`Self::tick_now`], recording the session if it just timed out.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotSaved` if the session timed out but could not
    /// be recorded.
    pub async fn tick(&self, session: &mut QuizSession) -> Result<QuizStep, QuizError> {
        match self.tick_now(session) {
            Some(completion) => self.complete(completion).await.map(QuizStep::Completed),
            None => Ok(QuizStep::Continue),
        }
    }

    /// Turn a completion into a history entry and append it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotSaved`, still carrying the entry, if history
    /// could not be written.
    pub async fn complete(&self, completion: QuizCompletion) -> Result<HistoryEntry, QuizError> {
        tracing::info!(
            key = %completion.key,
            score = completion.score,
            total = completion.total,
            reason = ?completion.reason,
            "quiz completed"
        );
        let entry = completion.into_history_entry();
        match self.history.record(entry.clone()).await {
            Ok(()) => Ok(entry),
            Err(source) => Err(QuizError::NotSaved {
                entry: Box::new(entry),
                source,
            }),
        }
    }
}
