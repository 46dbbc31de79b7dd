mod analytics_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use analytics_vm::{DifficultyStatsVm, TopicVm, map_overall_accuracy, map_topic_stats, map_topics};
pub use quiz_vm::{OptionState, OptionVm, QuizCardVm, map_quiz_card};
pub use results_vm::{ResultsVm, ReviewItemVm, map_results, map_review};
pub use time_fmt::{format_clock, format_datetime, format_duration};
