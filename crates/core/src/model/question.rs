use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id}: prompt cannot be empty")]
    EmptyPrompt { id: u32 },

    #[error("question {id}: at least two options are required")]
    TooFewOptions { id: u32 },

    #[error("question {id}: duplicate option {option:?}")]
    DuplicateOption { id: u32, option: String },

    #[error("question {id}: answer {answer:?} is not one of the options")]
    AnswerNotAnOption { id: u32, answer: String },
}

/// A multiple-choice question as it appears in a question bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: u32,
    #[serde(rename = "question")]
    prompt: String,
    options: Vec<String>,
    #[serde(rename = "answer")]
    correct_option: String,
    #[serde(default)]
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two options
    /// are given, options repeat, or the answer is not one of the options.
    pub fn new(
        id: u32,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let question = Self::from_parts(id, prompt, options, correct_option, explanation);
        question.validate()?;
        Ok(question)
    }

    pub(crate) fn from_parts(
        id: u32,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            options,
            correct_option: correct_option.into(),
            explanation: explanation.into(),
        }
    }

    /// Check the invariants of a question loaded from an untrusted source.
    ///
    /// # Errors
    ///
    /// See [`Question::new`].
    pub fn validate(&self) -> Result<(), QuestionError> {
        let id = self.id;
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions { id });
        }
        for (idx, option) in self.options.iter().enumerate() {
            if self.options[..idx].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.clone(),
                });
            }
        }
        if !self.options.contains(&self.correct_option) {
            return Err(QuestionError::AnswerNotAnOption {
                id,
                answer: self.correct_option.clone(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

/// Per-session copy of a question, annotated with the user's choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    #[serde(flatten)]
    question: Question,
    #[serde(
        rename = "userAnswer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    user_answer: Option<String>,
}

impl AnsweredQuestion {
    #[must_use]
    pub fn unanswered(question: Question) -> Self {
        Self {
            question,
            user_answer: None,
        }
    }

    pub(crate) fn record(&mut self, option: &str) {
        self.user_answer = Some(option.to_owned());
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer.as_deref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.user_answer
            .as_deref()
            .is_some_and(|answer| self.question.is_correct(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err = Question::new(1, "2 + 2?", options(&["3", "5"]), "4", "").unwrap_err();
        assert_eq!(
            err,
            QuestionError::AnswerNotAnOption {
                id: 1,
                answer: "4".into()
            }
        );
    }

    #[test]
    fn rejects_duplicate_options() {
        let err = Question::new(2, "Pick", options(&["a", "b", "a"]), "a", "").unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateOption { id: 2, .. }));
    }

    #[test]
    fn reads_bank_file_field_names() {
        let json = r#"{"id": 7, "question": "Q?", "options": ["x", "y"], "answer": "y", "explanation": "because"}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.prompt(), "Q?");
        assert_eq!(question.correct_option(), "y");
        assert!(question.validate().is_ok());
    }

    #[test]
    fn answered_question_serializes_user_answer_only_when_present() {
        let question = Question::new(1, "Q?", options(&["x", "y"]), "x", "").unwrap();
        let mut answered = AnsweredQuestion::unanswered(question);
        let json = serde_json::to_value(&answered).unwrap();
        assert!(json.get("userAnswer").is_none());

        answered.record("y");
        let json = serde_json::to_value(&answered).unwrap();
        assert_eq!(json["userAnswer"], "y");
        assert!(!answered.is_correct());
    }
}
