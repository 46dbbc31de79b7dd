use quiz_core::model::HistoryEntry;

use super::time_fmt::{format_datetime, format_duration};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage: u32,
    pub score_line: String,
    pub time_line: String,
    pub date_line: String,
    pub bucket: String,
}

#[must_use]
pub fn map_results(entry: &HistoryEntry) -> ResultsVm {
    let bucket = match entry.topic() {
        Some(topic) => format!("{} · {}", topic.display_name(), entry.difficulty().label()),
        None => entry.difficulty().label().to_owned(),
    };
    ResultsVm {
        percentage: entry.percentage(),
        score_line: format!("Your Score: {} / {}", entry.score(), entry.total_questions()),
        time_line: format!("Time Taken: {}", format_duration(entry.time_taken_secs())),
        date_line: format!("Completed: {}", format_datetime(entry.date())),
        bucket,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub title: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

impl ReviewItemVm {
    #[must_use]
    pub fn answer_class(&self) -> &'static str {
        if self.is_correct { "answer-correct" } else { "answer-wrong" }
    }
}

#[must_use]
pub fn map_review(entry: &HistoryEntry) -> Vec<ReviewItemVm> {
    entry
        .answered_questions()
        .iter()
        .enumerate()
        .map(|(index, answered)| {
            let question = answered.question();
            let explanation = question.explanation().trim();
            ReviewItemVm {
                title: format!("Question {}: {}", index + 1, question.prompt()),
                user_answer: answered.user_answer().unwrap_or("Not answered").to_owned(),
                correct_answer: question.correct_option().to_owned(),
                explanation: (!explanation.is_empty()).then(|| explanation.to_owned()),
                is_correct: answered.is_correct(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{BucketKey, Difficulty, Question, QuizSettings, Topic};
    use quiz_core::session::{QuizSession, QuizStart};
    use quiz_core::time::fixed_now;

    fn finished_entry() -> HistoryEntry {
        let questions = vec![
            Question::new(1, "First?", vec!["y".into(), "n".into()], "y", "Because.").unwrap(),
            Question::new(2, "Second?", vec!["y".into(), "n".into()], "n", "").unwrap(),
        ];
        let key = BucketKey::topical(Topic::new("nodejs").unwrap(), Difficulty::Medium);
        let settings = QuizSettings::new(1, 1_000).unwrap();
        let QuizStart::Ready(mut session) = QuizSession::start(key, questions, &settings, fixed_now()) else {
            panic!("expected a session");
        };
        session.submit_answer("y", fixed_now());
        session
            .tick(fixed_now() + chrono::Duration::seconds(65))
            .unwrap()
            .into_history_entry()
    }

    #[test]
    fn results_show_percentage_and_time() {
        let vm = map_results(&finished_entry());
        assert_eq!(vm.percentage, 50);
        assert_eq!(vm.score_line, "Your Score: 1 / 2");
        assert_eq!(vm.time_line, "Time Taken: 1m 05s");
        assert_eq!(vm.date_line, "Completed: 2023-11-14 22:14");
        assert_eq!(vm.bucket, "Nodejs · Medium");
    }

    #[test]
    fn review_marks_unanswered_questions() {
        let items = map_review(&finished_entry());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Question 1: First?");
        assert!(items[0].is_correct);
        assert_eq!(items[0].explanation.as_deref(), Some("Because."));
        assert_eq!(items[1].user_answer, "Not answered");
        assert_eq!(items[1].answer_class(), "answer-wrong");
        assert_eq!(items[1].explanation, None);
    }
}
