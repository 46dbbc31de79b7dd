use dioxus::prelude::*;
use quiz_core::model::HistoryEntry;

use crate::vm::map_results;

#[component]
pub fn ResultsView(
    entry: HistoryEntry,
    on_review: Callback<()>,
    on_again: Callback<()>,
    on_home: Callback<()>,
) -> Element {
    let vm = map_results(&entry);

    rsx! {
        div { class: "page results",
            h2 { "Quiz Complete!" }
            p { class: "results-bucket", "{vm.bucket}" }
            p { class: "results-percentage", "{vm.percentage}%" }
            p { class: "results-score", "{vm.score_line}" }
            p { class: "results-time", "{vm.time_line}" }
            p { class: "results-date", "{vm.date_line}" }
            div { class: "button-row",
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    onclick: move |_| on_review.call(()),
                    "Review Answers"
                }
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| on_again.call(()),
                    "Play Again"
                }
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| on_home.call(()),
                    "Back to Topics"
                }
            }
        }
    }
}
