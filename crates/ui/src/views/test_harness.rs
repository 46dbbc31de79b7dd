use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{BucketKey, HistoryEntry, QuizSettings, Theme, Topic};
use quiz_core::time::fixed_now;
use services::{AppServices, Clock};
use storage::repository::Storage;

use crate::app::{App, Boot, Shell};
use crate::context::{UiApp, build_app_context};
use crate::screen::Screen;
use crate::views::{DifficultyView, LoginView, QuizView, ResultsView, ReviewView, TopicsView};

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    App,
    /// The screen switcher opened at a given screen, logged out.
    Shell(Screen),
    Login,
    Topics,
    Difficulty(Option<Topic>),
    Quiz(BucketKey),
    Results(HistoryEntry),
    Review(HistoryEntry),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));

    match props.view {
        ViewKind::App => rsx! { App {} },
        ViewKind::Shell(start) => rsx! {
            Shell {
                boot: Boot { theme: Theme::Light, user: None },
                start,
            }
        },
        ViewKind::Login => rsx! {
            LoginView { on_login: move |_| {} }
        },
        ViewKind::Topics => rsx! {
            TopicsView {
                user: None,
                on_pick: move |_| {},
                on_logout: move |()| {},
                on_alert: move |_| {},
            }
        },
        ViewKind::Difficulty(topic) => rsx! {
            DifficultyView {
                topic,
                on_start: move |_| {},
                on_back: move |()| {},
            }
        },
        ViewKind::Quiz(bucket) => rsx! {
            QuizView {
                bucket,
                on_complete: move |_| {},
                on_unavailable: move |()| {},
                on_quit: move |()| {},
            }
        },
        ViewKind::Results(entry) => rsx! {
            ResultsView {
                entry,
                on_review: move |()| {},
                on_again: move |()| {},
                on_home: move |()| {},
            }
        },
        ViewKind::Review(entry) => rsx! {
            ReviewView { entry, on_back: move |()| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the rendered text contains `needle`, or give up.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        self.drive_rounds_until(needle, 20).await
    }

    /// As [`Self::drive_until`] with a caller-chosen number of rounds. Under
    /// paused time each round moves the clock at most 50ms.
    pub async fn drive_rounds_until(&mut self, needle: &str, rounds: usize) -> String {
        for _ in 0..rounds {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_services(storage: &Storage) -> Arc<AppServices> {
    test_services_with_settings(storage, QuizSettings::default())
}

pub fn test_services_with_settings(storage: &Storage, settings: QuizSettings) -> Arc<AppServices> {
    Arc::new(AppServices::from_storage(
        storage,
        Clock::fixed(fixed_now()),
        settings,
        None,
    ))
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, &Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    harness_over(view, test_services(storage))
}

pub fn setup_view_harness_with_settings(view: ViewKind, settings: QuizSettings) -> ViewHarness {
    harness_over(view, test_services_with_settings(&Storage::in_memory(), settings))
}

fn harness_over(view: ViewKind, app: Arc<AppServices>) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
        },
    );
    ViewHarness { dom, app }
}
