mod difficulty;
mod login;
mod modal;
mod quiz;
mod results;
mod review;
mod state;
mod theme_toggle;
mod topics;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use difficulty::DifficultyView;
pub use login::LoginView;
pub use modal::AlertModal;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use review::ReviewView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use theme_toggle::ThemeToggle;
pub use topics::{IMPORT_FAILED, IMPORT_SUCCEEDED, TopicsView};
