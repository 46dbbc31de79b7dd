mod countdown;
mod live;
mod workflow;

pub use countdown::{Countdown, TickControl};
pub use live::{LiveQuiz, LiveStart};
pub use workflow::{QuizService, QuizStep};
