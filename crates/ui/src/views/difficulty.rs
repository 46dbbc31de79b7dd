use dioxus::prelude::*;
use quiz_core::model::{Difficulty, Topic};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DifficultyStatsVm, map_topic_stats};

#[component]
pub fn DifficultyView(
    topic: Option<Topic>,
    on_start: Callback<Difficulty>,
    on_back: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();

    let heading = topic
        .as_ref()
        .map_or_else(|| "General".to_owned(), Topic::display_name);

    let resource = use_resource(move || {
        let history = history.clone();
        let topic = topic.clone();
        async move {
            let summary = history.summary().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_topic_stats(&summary, topic.as_ref()))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page difficulty",
            div { class: "page-header",
                h2 { "{heading}" }
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| on_back.call(()),
                    "Back"
                }
            }
            h3 { "Select a Difficulty" }
            div { class: "choice-grid",
                for difficulty in Difficulty::ALL {
                    button {
                        r#type: "button",
                        class: "btn choice difficulty-{difficulty}",
                        onclick: move |_| on_start.call(difficulty),
                        "{difficulty.label()}"
                    }
                }
            }

            match state {
                ViewState::Ready(stats) => rsx! {
                    StatsTable { stats }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {},
            }
        }
    }
}

#[component]
fn StatsTable(stats: Vec<DifficultyStatsVm>) -> Element {
    rsx! {
        table { class: "stats-table",
            thead {
                tr {
                    th { "Difficulty" }
                    th { "Accuracy" }
                    th { "Avg. time" }
                }
            }
            tbody {
                for stat in stats {
                    tr {
                        td { "{stat.label}" }
                        td { "{stat.accuracy}" }
                        td { "{stat.avg_time}" }
                    }
                }
            }
        }
    }
}
