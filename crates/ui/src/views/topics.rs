use std::path::PathBuf;

use dioxus::prelude::*;
use quiz_core::model::{Topic, UserName};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DifficultyStatsVm, TopicVm, map_overall_accuracy, map_topics};

pub const IMPORT_SUCCEEDED: &str = "Questions imported successfully!";
pub const IMPORT_FAILED: &str = "Failed to import file. Please ensure it's a valid JSON.";

#[derive(Clone, Debug, PartialEq)]
struct TopicsData {
    topics: Vec<TopicVm>,
    overall: Vec<DifficultyStatsVm>,
}

#[component]
pub fn TopicsView(
    user: Option<UserName>,
    on_pick: Callback<Option<Topic>>,
    on_logout: Callback<()>,
    on_alert: Callback<String>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let bank = ctx.bank();
    let history = ctx.history();
    let identity = ctx.identity();
    let export_path = ctx.export_path();
    let mut import_path = use_signal(String::new);

    let mut resource = {
        let bank = bank.clone();
        use_resource(move || {
            let bank = bank.clone();
            let history = history.clone();
            async move {
                let current = bank.current().await.map_err(|_| ViewError::Unknown)?;
                let entries = history.history().await.map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(TopicsData {
                    topics: map_topics(&current),
                    overall: map_overall_accuracy(&entries),
                })
            }
        })
    };

    let import = {
        let bank = bank.clone();
        use_callback(move |()| {
            let raw = import_path.read().trim().to_owned();
            if raw.is_empty() {
                return;
            }
            let bank = bank.clone();
            spawn(async move {
                match bank.import_file(&PathBuf::from(raw)).await {
                    Ok(_) => {
                        import_path.set(String::new());
                        resource.restart();
                        on_alert.call(IMPORT_SUCCEEDED.to_owned());
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "question import failed");
                        on_alert.call(IMPORT_FAILED.to_owned());
                    }
                }
            });
        })
    };

    let export = use_callback(move |()| {
        let bank = bank.clone();
        let path = export_path.clone();
        spawn(async move {
            match bank.export_to(&path).await {
                Ok(()) => on_alert.call(format!("Questions exported to {}", path.display())),
                Err(err) => {
                    tracing::warn!(error = %err, "question export failed");
                    on_alert.call("Failed to export questions.".to_owned());
                }
            }
        });
    });

    let logout = use_callback(move |()| {
        let identity = identity.clone();
        spawn(async move {
            if let Err(err) = identity.logout().await {
                tracing::warn!(error = %err, "could not clear stored user");
            }
            on_logout.call(());
        });
    });

    let greeting = user.map_or_else(|| "Hello!".to_owned(), |name| format!("Hello, {name}!"));
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page topics",
            div { class: "page-header",
                h2 { "{greeting}" }
                button {
                    r#type: "button",
                    class: "btn btn-danger",
                    onclick: move |_| logout.call(()),
                    "Logout"
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    h3 { "Choose a Topic" }
                    if data.topics.is_empty() {
                        p { "No questions yet. Import a question file to begin." }
                    } else {
                        div { class: "choice-grid",
                            for item in data.topics {
                                TopicButton { item, on_pick }
                            }
                        }
                    }

                    section { class: "data-panel",
                        h3 { "Data & Analytics" }
                        div { class: "import-row",
                            input {
                                r#type: "text",
                                placeholder: "Path to a questions .json file",
                                value: "{import_path}",
                                oninput: move |evt| import_path.set(evt.value()),
                            }
                            button {
                                r#type: "button",
                                class: "btn",
                                onclick: move |_| import.call(()),
                                "Import"
                            }
                            button {
                                r#type: "button",
                                class: "btn",
                                onclick: move |_| export.call(()),
                                "Export Questions"
                            }
                        }
                        p { class: "stats-title", "Overall Accuracy:" }
                        div { class: "stats-grid",
                            for stat in data.overall {
                                div { class: "stat",
                                    p { class: "stat-label", "{stat.label}" }
                                    p { class: "stat-value", "{stat.accuracy}" }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        r#type: "button",
                        class: "btn",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn TopicButton(item: TopicVm, on_pick: Callback<Option<Topic>>) -> Element {
    let topic = item.topic.clone();
    rsx! {
        button {
            r#type: "button",
            class: "btn choice",
            onclick: move |_| on_pick.call(topic.clone()),
            "{item.label}"
        }
    }
}
