use dioxus::prelude::*;
use quiz_core::model::HistoryEntry;

use crate::vm::{ReviewItemVm, map_review};

#[component]
pub fn ReviewView(entry: HistoryEntry, on_back: Callback<()>) -> Element {
    let items = map_review(&entry);

    rsx! {
        div { class: "page review",
            div { class: "page-header",
                h2 { "Review Answers" }
                button {
                    r#type: "button",
                    class: "btn",
                    onclick: move |_| on_back.call(()),
                    "Back to Results"
                }
            }
            div { class: "review-list",
                for item in items {
                    ReviewItem { item }
                }
            }
        }
    }
}

#[component]
fn ReviewItem(item: ReviewItemVm) -> Element {
    rsx! {
        div { class: "review-item",
            h3 { "{item.title}" }
            p {
                "Your answer: "
                span { class: item.answer_class(), "{item.user_answer}" }
            }
            p {
                "Correct answer: "
                span { class: "answer-correct", "{item.correct_answer}" }
            }
            if let Some(explanation) = item.explanation.clone() {
                p { class: "review-explanation-label", "Explanation:" }
                p { class: "review-explanation", "{explanation}" }
            }
        }
    }
}
