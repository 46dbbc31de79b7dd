use dioxus::prelude::*;
use quiz_core::model::{Difficulty, HistoryEntry, Theme, Topic, UserName};

use crate::context::AppContext;
use crate::screen::Screen;
use crate::views::{
    AlertModal, DifficultyView, LoginView, QuizView, ResultsView, ReviewView, ThemeToggle,
    TopicsView, ViewError, ViewState, view_state_from_resource,
};

pub const NO_QUESTIONS: &str = "No questions available for this difficulty.";

/// What the shell needs before the first screen can show.
#[derive(Clone, Debug, PartialEq)]
pub struct Boot {
    pub theme: Theme,
    pub user: Option<UserName>,
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    let boot = use_resource(move || {
        let identity = ctx.identity();
        let theme = ctx.theme();
        async move {
            let theme = theme.load().await.map_err(|_| ViewError::Unknown)?;
            let user = identity.current().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(Boot { theme, user })
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Trivia Quiz" }

        ErrorBoundary {
            handle_error: |errors: ErrorContext| rsx! {
                div { class: "fatal",
                    h1 { "Something went wrong" }
                    pre { "{errors:?}" }
                }
            },
            match view_state_from_resource(&boot) {
                ViewState::Ready(boot) => {
                    let start = Screen::resume(boot.user.is_some());
                    rsx! {
                        Shell { boot, start }
                    }
                }
                ViewState::Error(err) => rsx! {
                    div { class: "fatal", p { "{err.message()}" } }
                },
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { class: "app-root", p { "Loading..." } }
                },
            }
        }
    }
}

/// Screen switcher, opened at `start`.
#[component]
pub fn Shell(boot: Boot, start: Screen) -> Element {
    let theme = use_signal(|| boot.theme);
    let mut user = use_signal(|| boot.user.clone());
    let screen = use_signal(|| start.clone());
    let mut alert = use_signal(|| None::<String>);

    let root_class = if theme().is_dark() {
        "app-root theme-dark"
    } else {
        "app-root theme-light"
    };
    let current = screen.read().clone();

    rsx! {
        div { class: "{root_class}",
            header { class: "app-header",
                h1 { "Trivia Quiz" }
                ThemeToggle { theme }
            }
            main { class: "app-main",
                match current {
                    Screen::Login => rsx! {
                        LoginView {
                            on_login: move |name: UserName| {
                                user.set(Some(name));
                                navigate(screen, Screen::after_login);
                            },
                        }
                    },
                    Screen::Topics => rsx! {
                        TopicsView {
                            user: user(),
                            on_pick: move |topic: Option<Topic>| navigate(screen, |s| s.pick_topic(topic)),
                            on_logout: move |()| {
                                user.set(None);
                                navigate(screen, Screen::logout);
                            },
                            on_alert: move |message: String| alert.set(Some(message)),
                        }
                    },
                    Screen::Difficulty { topic } => rsx! {
                        DifficultyView {
                            topic,
                            on_start: move |difficulty: Difficulty| navigate(screen, |s| s.start_quiz(difficulty)),
                            on_back: move |()| navigate(screen, Screen::back),
                        }
                    },
                    Screen::Quiz { key } => rsx! {
                        QuizView {
                            bucket: key,
                            on_complete: move |entry: HistoryEntry| navigate(screen, |s| s.quiz_completed(entry)),
                            on_unavailable: move |()| {
                                alert.set(Some(NO_QUESTIONS.to_owned()));
                                navigate(screen, Screen::quiz_unavailable);
                            },
                            on_quit: move |()| navigate(screen, Screen::back),
                        }
                    },
                    Screen::Results { entry } => rsx! {
                        ResultsView {
                            entry,
                            on_review: move |()| navigate(screen, Screen::review),
                            on_again: move |()| navigate(screen, Screen::play_again),
                            on_home: move |()| navigate(screen, Screen::home),
                        }
                    },
                    Screen::Review { entry } => rsx! {
                        ReviewView {
                            entry,
                            on_back: move |()| navigate(screen, Screen::back),
                        }
                    },
                }
            }
            if let Some(message) = alert() {
                AlertModal {
                    message,
                    on_close: move |()| alert.set(None),
                }
            }
        }
    }
}

/// Apply a transition to the current screen.
fn navigate(mut screen: Signal<Screen>, step: impl FnOnce(&Screen) -> Screen) {
    let next = step(&screen.peek());
    if screen.peek().is_quiz() && !next.is_quiz() {
        tracing::debug!("quiz screen closed");
    }
    screen.set(next);
}
