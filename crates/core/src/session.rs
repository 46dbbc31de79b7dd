//! Timed quiz session engine.
//!
//! The engine never reads a clock or owns a timer. Callers stamp each
//! transition with the current instant and drive [`QuizSession::tick`] from
//! whatever scheduler they own.

use chrono::{DateTime, Duration, Utc};

use crate::model::{AnsweredQuestion, BucketKey, HistoryEntry, Question, QuizSettings};
use crate::time::elapsed_secs_rounded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    AllAnswered,
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    Active,
    Completed(CompletionReason),
}

/// Result of trying to start a session for a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStart {
    Ready(QuizSession),
    /// The bucket had no questions. No session exists and no timer may run.
    Unavailable(BucketKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded {
        correct: bool,
        correct_option: String,
        advance_at: DateTime<Utc>,
    },
    /// Double submit, submit during the reveal delay, or submit after completion.
    Ignored,
}

/// Snapshot for progress bars and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub remaining_secs: u32,
}

/// Emitted exactly once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCompletion {
    pub key: BucketKey,
    pub score: u32,
    /// Always the full question count; unanswered questions count as wrong.
    pub total: u32,
    pub time_taken_secs: u64,
    pub questions: Vec<AnsweredQuestion>,
    pub reason: CompletionReason,
    pub completed_at: DateTime<Utc>,
}

impl QuizCompletion {
    #[must_use]
    pub fn into_history_entry(self) -> HistoryEntry {
        HistoryEntry::from_parts(
            self.completed_at,
            self.key,
            self.score.min(self.total),
            self.total,
            self.time_taken_secs,
            self.questions,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    key: BucketKey,
    questions: Vec<AnsweredQuestion>,
    position: usize,
    score: u32,
    started_at: DateTime<Utc>,
    remaining_secs: u32,
    answer_reveal: Duration,
    pending_advance: Option<DateTime<Utc>>,
    status: QuizStatus,
}

impl QuizSession {
    /// Start a session over an already ordered question sequence.
    #[must_use]
    pub fn start(
        key: BucketKey,
        questions: Vec<Question>,
        settings: &QuizSettings,
        now: DateTime<Utc>,
    ) -> QuizStart {
        if questions.is_empty() {
            return QuizStart::Unavailable(key);
        }
        QuizStart::Ready(Self {
            key,
            questions: questions
                .into_iter()
                .map(AnsweredQuestion::unanswered)
                .collect(),
            position: 0,
            score: 0,
            started_at: now,
            remaining_secs: settings.time_limit_secs(),
            answer_reveal: settings.answer_reveal(),
            pending_advance: None,
            status: QuizStatus::Active,
        })
    }

    #[must_use]
    pub fn key(&self) -> &BucketKey {
        &self.key
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == QuizStatus::Active
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<DateTime<Utc>> {
        self.pending_advance
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    /// The question on screen, including while its answer is being revealed.
    #[must_use]
    pub fn current(&self) -> Option<&AnsweredQuestion> {
        if !self.is_active() {
            return None;
        }
        self.questions.get(self.position)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current().map(AnsweredQuestion::question)
    }

    #[must_use]
    pub fn questions(&self) -> &[AnsweredQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.position,
            total: self.questions.len(),
            answered: self.answered_count(),
            remaining_secs: self.remaining_secs,
        }
    }

    /// Record an answer for the current question.
    ///
    /// The position does not move; call [`QuizSession::advance`] once the
    /// returned `advance_at` has passed.
    pub fn submit_answer(&mut self, option: &str, now: DateTime<Utc>) -> AnswerOutcome {
        if !self.is_active() || self.pending_advance.is_some() {
            return AnswerOutcome::Ignored;
        }
        let Some(slot) = self.questions.get_mut(self.position) else {
            return AnswerOutcome::Ignored;
        };
        if slot.is_answered() {
            return AnswerOutcome::Ignored;
        }

        slot.record(option);
        let correct = slot.is_correct();
        let correct_option = slot.question().correct_option().to_owned();
        if correct {
            self.score = self.score.saturating_add(1);
        }
        let advance_at = now + self.answer_reveal;
        self.pending_advance = Some(advance_at);

        AnswerOutcome::Recorded {
            correct,
            correct_option,
            advance_at,
        }
    }

    /// Move past an answered question once its reveal delay has elapsed.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Option<QuizCompletion> {
        if !self.is_active() {
            return None;
        }
        let advance_at = self.pending_advance?;
        if now < advance_at {
            return None;
        }

        self.pending_advance = None;
        self.position = (self.position + 1).min(self.questions.len());
        if self.position == self.questions.len() {
            return Some(self.complete(CompletionReason::AllAnswered, now));
        }
        None
    }

    /// One countdown second. Reaching zero completes the session immediately.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<QuizCompletion> {
        if !self.is_active() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete(CompletionReason::TimeExpired, now));
        }
        None
    }

    fn complete(&mut self, reason: CompletionReason, now: DateTime<Utc>) -> QuizCompletion {
        self.status = QuizStatus::Completed(reason);
        self.pending_advance = None;

        QuizCompletion {
            key: self.key.clone(),
            score: self.score,
            total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
            time_taken_secs: elapsed_secs_rounded(self.started_at, now),
            questions: self.questions.clone(),
            reason,
            completed_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Topic};
    use crate::time::fixed_now;

    fn questions(n: u32) -> Vec<Question> {
        (1..=n)
            .map(|id| {
                Question::new(
                    id,
                    format!("Q{id}"),
                    vec!["right".into(), "wrong".into()],
                    "right",
                    "",
                )
                .unwrap()
            })
            .collect()
    }

    fn key() -> BucketKey {
        BucketKey::topical(Topic::new("rust").unwrap(), Difficulty::Easy)
    }

    fn start(n: u32, settings: QuizSettings) -> QuizSession {
        match QuizSession::start(key(), questions(n), &settings, fixed_now()) {
            QuizStart::Ready(session) => session,
            QuizStart::Unavailable(_) => panic!("expected a session"),
        }
    }

    fn secs(n: i64) -> Duration {
        Duration::seconds(n)
    }

    fn answer_and_advance(
        session: &mut QuizSession,
        option: &str,
        at: DateTime<Utc>,
    ) -> Option<QuizCompletion> {
        let AnswerOutcome::Recorded { advance_at, .. } = session.submit_answer(option, at) else {
            panic!("answer was ignored");
        };
        session.advance(advance_at)
    }

    #[test]
    fn empty_bucket_is_unavailable() {
        let start = QuizSession::start(key(), Vec::new(), &QuizSettings::default(), fixed_now());
        assert_eq!(start, QuizStart::Unavailable(key()));
    }

    #[test]
    fn starts_at_first_question_with_full_budget() {
        let settings = QuizSettings::new(1_200, 1_000).unwrap();
        let session = start(2, settings);
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.remaining_secs(), 1_200);
        assert_eq!(session.current_question().map(Question::id), Some(1));
    }

    #[test]
    fn all_correct_completes_with_full_score() {
        let mut session = start(3, QuizSettings::default());
        let t0 = fixed_now();

        assert!(answer_and_advance(&mut session, "right", t0 + secs(2)).is_none());
        assert!(answer_and_advance(&mut session, "right", t0 + secs(5)).is_none());
        let done = answer_and_advance(&mut session, "right", t0 + secs(9)).unwrap();

        assert_eq!(done.score, 3);
        assert_eq!(done.total, 3);
        assert_eq!(done.reason, CompletionReason::AllAnswered);
        assert_eq!(done.time_taken_secs, 10);
        assert_eq!(session.status(), QuizStatus::Completed(CompletionReason::AllAnswered));
        assert_eq!(done.into_history_entry().percentage(), 100);
    }

    #[test]
    fn submit_does_not_advance_before_reveal_delay() {
        let mut session = start(2, QuizSettings::default());
        let t0 = fixed_now();
        let outcome = session.submit_answer("wrong", t0);

        assert_eq!(
            outcome,
            AnswerOutcome::Recorded {
                correct: false,
                correct_option: "right".into(),
                advance_at: t0 + secs(1),
            }
        );
        assert_eq!(session.position(), 0);
        assert!(session.advance(t0 + Duration::milliseconds(999)).is_none());
        assert_eq!(session.position(), 0);
        assert!(session.advance(t0 + secs(1)).is_none());
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn double_submit_is_a_no_op() {
        let mut session = start(2, QuizSettings::default());
        let t0 = fixed_now();
        session.submit_answer("right", t0);

        assert_eq!(session.submit_answer("wrong", t0), AnswerOutcome::Ignored);
        assert_eq!(session.score(), 1);
        assert_eq!(session.position(), 0);
        assert_eq!(session.current().and_then(AnsweredQuestion::user_answer), Some("right"));
    }

    #[test]
    fn advance_without_answer_is_a_no_op() {
        let mut session = start(2, QuizSettings::default());
        assert!(session.advance(fixed_now() + secs(10)).is_none());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn timeout_after_one_of_five_scores_against_full_set() {
        let settings = QuizSettings::new(3, 1_000).unwrap();
        let mut session = start(5, settings);
        let t0 = fixed_now();

        assert!(answer_and_advance(&mut session, "right", t0).is_none());
        assert!(session.tick(t0 + secs(1)).is_none());
        assert!(session.tick(t0 + secs(2)).is_none());
        let done = session.tick(t0 + secs(3)).unwrap();

        assert_eq!(done.reason, CompletionReason::TimeExpired);
        assert_eq!(done.score, 1);
        assert_eq!(done.total, 5);
        assert_eq!(done.time_taken_secs, 3);
        assert_eq!(done.questions.len(), 5);
        assert_eq!(done.questions.iter().filter(|q| q.is_answered()).count(), 1);
        assert!(done.questions[1..].iter().all(|q| q.user_answer().is_none()));

        // terminal: no further ticks or answers take effect
        assert!(session.tick(t0 + secs(4)).is_none());
        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(session.submit_answer("right", t0 + secs(4)), AnswerOutcome::Ignored);
    }

    #[test]
    fn timeout_during_reveal_blocks_natural_completion() {
        let settings = QuizSettings::new(1, 1_000).unwrap();
        let mut session = start(1, settings);
        let t0 = fixed_now();

        session.submit_answer("right", t0);
        let forced = session.tick(t0 + Duration::milliseconds(400)).unwrap();
        assert_eq!(forced.reason, CompletionReason::TimeExpired);
        assert_eq!(forced.score, 1);
        assert_eq!(forced.time_taken_secs, 0);

        assert!(session.advance(t0 + secs(2)).is_none());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn natural_completion_stops_the_countdown() {
        let mut session = start(1, QuizSettings::default());
        let t0 = fixed_now();
        answer_and_advance(&mut session, "wrong", t0).unwrap();

        let remaining = session.remaining_secs();
        assert!(session.tick(t0 + secs(2)).is_none());
        assert_eq!(session.remaining_secs(), remaining);
    }

    #[test]
    fn position_and_score_stay_bounded() {
        let mut session = start(4, QuizSettings::default());
        let mut now = fixed_now();
        let mut last_score = 0;
        let mut last_position = 0;
        for (i, option) in ["right", "wrong", "right", "wrong", "right"].iter().enumerate() {
            now += secs(2);
            session.submit_answer(option, now);
            session.submit_answer(option, now);
            now += secs(2);
            session.advance(now);

            assert!(session.position() <= session.question_count(), "step {i}");
            assert!(session.position() >= last_position);
            assert!(session.score() >= last_score);
            assert!(session.score() as usize <= session.answered_count());
            last_score = session.score();
            last_position = session.position();
        }
        assert_eq!(session.score(), 2);
        assert!(!session.is_active());
    }
}
