use quiz_core::session::QuizSession;

use super::time_fmt::format_clock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Nothing answered yet; clickable.
    Open,
    Correct,
    Wrong,
    /// Answered, but this option was neither picked nor right.
    Locked,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open => "option",
            OptionState::Correct => "option option-correct",
            OptionState::Wrong => "option option-wrong",
            OptionState::Locked => "option option-locked",
        }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self == OptionState::Open
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub counter: String,
    pub timer: String,
    /// Share of questions already passed, `0..=100`.
    pub progress_percent: usize,
}

/// Card for the question on screen; `None` once the session is over.
#[must_use]
pub fn map_quiz_card(session: &QuizSession) -> Option<QuizCardVm> {
    let current = session.current()?;
    let question = current.question();
    let picked = current.user_answer();

    let options = question
        .options()
        .iter()
        .map(|option| {
            let state = match picked {
                None => OptionState::Open,
                Some(_) if question.is_correct(option) => OptionState::Correct,
                Some(answer) if answer == option => OptionState::Wrong,
                Some(_) => OptionState::Locked,
            };
            OptionVm {
                text: option.clone(),
                state,
            }
        })
        .collect();

    let total = session.question_count();
    Some(QuizCardVm {
        prompt: question.prompt().to_owned(),
        options,
        counter: format!("Question {} / {total}", session.position() + 1),
        timer: format_clock(session.remaining_secs()),
        progress_percent: session.position() * 100 / total.max(1),
    })
}
