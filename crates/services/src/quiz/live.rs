use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};

use quiz_core::model::{BucketKey, HistoryEntry};
use quiz_core::session::{AnswerOutcome, QuizCompletion, QuizSession, QuizStart};

use super::countdown::{Countdown, TickControl};
use super::workflow::QuizService;
use crate::error::QuizError;

const ADVANCE_RETRY: Duration = Duration::from_millis(50);

pub enum LiveStart {
    Running(LiveQuiz),
    Unavailable(BucketKey),
}

/// A session driven by its own countdown task.
///
/// Dropping the `LiveQuiz` stops the countdown; an unfinished session is
/// discarded without touching history.
pub struct LiveQuiz {
    service: Arc<QuizService>,
    session: Arc<Mutex<QuizSession>>,
    done_tx: Arc<watch::Sender<Option<HistoryEntry>>>,
    done_rx: watch::Receiver<Option<HistoryEntry>>,
    countdown: Countdown,
}

impl LiveQuiz {
    /// Start a session for `key` and its countdown.
    pub async fn start(service: Arc<QuizService>, key: BucketKey) -> LiveStart {
        let session = match service.start(key).await {
            QuizStart::Ready(session) => Arc::new(Mutex::new(session)),
            QuizStart::Unavailable(key) => return LiveStart::Unavailable(key),
        };
        let (done_tx, done_rx) = watch::channel(None);
        let done_tx = Arc::new(done_tx);

        let countdown = {
            let service = Arc::clone(&service);
            let session = Arc::clone(&session);
            let done_tx = Arc::clone(&done_tx);
            Countdown::every_second(move || {
                let service = Arc::clone(&service);
                let session = Arc::clone(&session);
                let done_tx = Arc::clone(&done_tx);
                async move {
                    let completion = {
                        let mut session = session.lock().await;
                        if !session.is_active() {
                            return TickControl::Stop;
                        }
                        match service.tick_now(&mut session) {
                            Some(completion) => completion,
                            None => return TickControl::Continue,
                        }
                    };
                    // Errors are published with the entry; the tick task has no caller.
                    let _ = publish(&service, &done_tx, completion).await;
                    TickControl::Stop
                }
            })
        };

        LiveStart::Running(Self {
            service,
            session,
            done_tx,
            done_rx,
            countdown,
        })
    }

    /// Copy of the session as it stands now.
    pub async fn snapshot(&self) -> QuizSession {
        self.session.lock().await.clone()
    }

    /// Submit an answer, wait out the reveal delay, then move on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotSaved` if this answer finished the session but
    /// history could not be written. The entry is still published.
    pub async fn answer(&self, option: &str) -> Result<AnswerOutcome, QuizError> {
        let outcome = {
            let mut session = self.session.lock().await;
            self.service.submit(&mut session, option)
        };
        let AnswerOutcome::Recorded { .. } = &outcome else {
            return Ok(outcome);
        };

        let reveal = Duration::from_millis(self.service.settings().answer_reveal_ms());
        tokio::time::sleep(reveal).await;

        // The wall clock may trail the timer slightly; retry until the
        // reveal deadline has passed or the countdown ends the session.
        let completion = loop {
            let mut session = self.session.lock().await;
            if let Some(completion) = self.service.advance_now(&mut session) {
                break completion;
            }
            if !session.is_active() || session.pending_advance().is_none() {
                return Ok(outcome);
            }
            drop(session);
            tokio::time::sleep(ADVANCE_RETRY).await;
        };

        // The session is terminal now, so ticks stop without waiting on the write.
        self.countdown.cancel();
        publish(&self.service, &self.done_tx, completion).await?;
        Ok(outcome)
    }

    /// The finished entry, if the session is over.
    #[must_use]
    pub fn completion(&self) -> Option<HistoryEntry> {
        self.done_rx.borrow().as_ref().cloned()
    }

    /// Receiver that turns `Some` once the session is over.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<HistoryEntry>> {
        self.done_rx.clone()
    }

    /// Wait until the session finishes by answers or by timeout.
    pub async fn finished(&mut self) -> Option<HistoryEntry> {
        self.done_rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|entry| entry.as_ref().cloned())
    }
}

/// Record `completion` and hand the entry to subscribers, saved or not.
async fn publish(
    service: &QuizService,
    done_tx: &watch::Sender<Option<HistoryEntry>>,
    completion: QuizCompletion,
) -> Result<(), QuizError> {
    match service.complete(completion).await {
        Ok(entry) => {
            done_tx.send_replace(Some(entry));
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "quiz result could not be saved");
            if let Some(entry) = err.entry() {
                done_tx.send_replace(Some(entry.clone()));
            }
            Err(err)
        }
    }
}
