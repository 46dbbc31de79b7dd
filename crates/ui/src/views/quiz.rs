use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::model::{BucketKey, HistoryEntry};
use quiz_core::session::{AnswerOutcome, QuizCompletion, QuizSession, QuizStart};
use services::QuizService;

use crate::context::AppContext;
use crate::vm::{OptionVm, map_quiz_card};

const TICK: Duration = Duration::from_secs(1);
const ADVANCE_RETRY: Duration = Duration::from_millis(50);

/// A running quiz. The countdown starts once questions are loaded; it and
/// the reveal delays are tasks of this component and stop when it unmounts.
#[component]
pub fn QuizView(
    bucket: BucketKey,
    on_complete: Callback<HistoryEntry>,
    on_unavailable: Callback<()>,
    on_quit: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let reveal = Duration::from_millis(quiz.settings().answer_reveal_ms());
    let mut session = use_signal(|| None::<QuizSession>);

    {
        let quiz = quiz.clone();
        use_future(move || {
            let quiz = quiz.clone();
            let bucket = bucket.clone();
            async move {
                match quiz.start(bucket).await {
                    QuizStart::Ready(started) => session.set(Some(started)),
                    QuizStart::Unavailable(_) => {
                        on_unavailable.call(());
                        return;
                    }
                }
                loop {
                    tokio::time::sleep(TICK).await;
                    let completion =
                        session.with_mut(|s| s.as_mut().and_then(|s| quiz.tick_now(s)));
                    if let Some(completion) = completion {
                        record(&quiz, completion, on_complete).await;
                        break;
                    }
                    if session.with_peek(|s| s.as_ref().is_none_or(|s| !s.is_active())) {
                        break;
                    }
                }
            }
        });
    }

    let on_pick = use_callback(move |option: String| {
        let outcome = session.with_mut(|s| s.as_mut().map(|s| quiz.submit(s, &option)));
        if !matches!(outcome, Some(AnswerOutcome::Recorded { .. })) {
            return;
        }
        let quiz = quiz.clone();
        spawn(async move {
            tokio::time::sleep(reveal).await;
            loop {
                let (completion, waiting) = session.with_mut(|s| match s.as_mut() {
                    Some(s) => {
                        let completion = quiz.advance_now(s);
                        (completion, s.is_active() && s.pending_advance().is_some())
                    }
                    None => (None, false),
                });
                if let Some(completion) = completion {
                    record(&quiz, completion, on_complete).await;
                    return;
                }
                if !waiting {
                    return;
                }
                tokio::time::sleep(ADVANCE_RETRY).await;
            }
        });
    });

    let card = session.with(|s| s.as_ref().and_then(map_quiz_card));
    let started = session.with(Option::is_some);

    rsx! {
        div { class: "page quiz",
            match card {
                Some(card) => rsx! {
                    div { class: "quiz-header",
                        span { class: "quiz-counter", "{card.counter}" }
                        span { class: "quiz-timer", "{card.timer}" }
                    }
                    div { class: "progress",
                        div {
                            class: "progress-bar",
                            style: "width: {card.progress_percent}%",
                        }
                    }
                    h3 { class: "quiz-prompt", "{card.prompt}" }
                    ul { class: "quiz-options",
                        for option in card.options {
                            OptionButton { option, on_pick }
                        }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-link",
                        onclick: move |_| on_quit.call(()),
                        "Quit quiz"
                    }
                },
                None if started => rsx! {
                    p { "Finishing..." }
                },
                None => rsx! {
                    p { "Loading questions..." }
                },
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_pick: Callback<String>) -> Element {
    let text = option.text.clone();
    rsx! {
        li {
            button {
                r#type: "button",
                class: option.state.class(),
                disabled: !option.state.is_open(),
                onclick: move |_| on_pick.call(text.clone()),
                "{option.text}"
            }
        }
    }
}

async fn record(quiz: &Arc<QuizService>, completion: QuizCompletion, on_complete: Callback<HistoryEntry>) {
    match quiz.complete(completion).await {
        Ok(entry) => on_complete.call(entry),
        Err(err) => {
            tracing::error!(error = %err, "quiz result could not be saved");
            if let Some(entry) = err.entry() {
                on_complete.call(entry.clone());
            }
        }
    }
}
