use quiz_core::model::{
    AnsweredQuestion, BucketKey, Difficulty, HistoryEntry, Question, QuizSettings, Topic,
};
use quiz_core::time::fixed_now;
use storage::repository::Storage;

use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_with_settings,
    setup_view_harness_with_storage, test_services,
};
use crate::app::NO_QUESTIONS;
use crate::screen::Screen;

fn nodejs() -> Topic {
    Topic::new("nodejs").unwrap()
}

fn finished_entry() -> HistoryEntry {
    let answered = (1..=3)
        .map(|id| {
            let question = Question::new(
                id,
                format!("Question text {id}"),
                vec!["yes".into(), "no".into()],
                "yes",
                "",
            )
            .unwrap();
            AnsweredQuestion::unanswered(question)
        })
        .collect();
    HistoryEntry::new(
        fixed_now(),
        BucketKey::topical(nodejs(), Difficulty::Easy),
        2,
        3,
        65,
        answered,
    )
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_prompt() {
    let mut harness = setup_view_harness(ViewKind::Login);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Enter your username:"));
    assert!(html.contains("Start"));
}

#[tokio::test(flavor = "current_thread")]
async fn topics_view_smoke_lists_builtin_topics() {
    let mut harness = setup_view_harness(ViewKind::Topics);
    harness.rebuild();

    let html = harness.drive_until("Choose a Topic").await;
    assert!(html.contains("Nodejs"));
    assert!(html.contains("Laravel"));
    assert!(html.contains("Overall Accuracy:"));
    assert!(!html.contains("General"));
}

#[tokio::test(flavor = "current_thread")]
async fn topics_view_smoke_shows_recorded_accuracy() {
    let storage = Storage::in_memory();
    test_services(&storage)
        .history()
        .record(finished_entry())
        .await
        .unwrap();

    let mut harness = setup_view_harness_with_storage(ViewKind::Topics, &storage);
    harness.rebuild();

    let html = harness.drive_until("Overall Accuracy:").await;
    assert!(html.contains("67%"));
}

#[tokio::test(flavor = "current_thread")]
async fn difficulty_view_smoke_lists_levels_and_stats() {
    let mut harness = setup_view_harness(ViewKind::Difficulty(Some(nodejs())));
    harness.rebuild();

    let html = harness.drive_until("Avg. time").await;
    assert!(html.contains("Nodejs"));
    assert!(html.contains("Select a Difficulty"));
    assert!(html.contains("Easy"));
    assert!(html.contains("Medium"));
    assert!(html.contains("Hard"));
    assert!(html.contains("0%"));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_first_question_and_timer() {
    let key = BucketKey::topical(nodejs(), Difficulty::Easy);
    let mut harness = setup_view_harness(ViewKind::Quiz(key));
    harness.rebuild();
    assert!(harness.render().contains("Loading questions..."));

    let html = harness.drive_until("Question 1 / 3").await;
    assert!(html.contains("Question 1 / 3"));
    assert!(html.contains("5:00"));
    assert!(html.contains("Quit quiz"));
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_shows_score() {
    let mut harness = setup_view_harness(ViewKind::Results(finished_entry()));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Quiz Complete!"));
    assert!(html.contains("67%"));
    assert!(html.contains("Your Score: 2 / 3"));
    assert!(html.contains("Time Taken: 1m 05s"));
    assert!(html.contains("Completed: 2023-11-14 22:13"));
    assert!(html.contains("Review Answers"));
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_smoke_marks_unanswered_questions() {
    let mut harness = setup_view_harness(ViewKind::Review(finished_entry()));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Question 1: Question text 1"));
    assert!(html.contains("Not answered"));
    assert!(html.contains("Back to Results"));
}

#[tokio::test(flavor = "current_thread")]
async fn app_smoke_starts_on_login_without_a_stored_user() {
    let mut harness = setup_view_harness(ViewKind::App);
    harness.rebuild();

    let html = harness.drive_until("Enter your username:").await;
    assert!(html.contains("Trivia Quiz"));
    assert!(html.contains("Enter your username:"));
}

#[tokio::test(flavor = "current_thread")]
async fn app_smoke_resumes_on_topics_for_a_stored_user() {
    let storage = Storage::in_memory();
    test_services(&storage).identity().login("Ada").await.unwrap();

    let mut harness = setup_view_harness_with_storage(ViewKind::App, &storage);
    harness.rebuild();

    let html = harness.drive_until("Choose a Topic").await;
    assert!(html.contains("Hello, Ada!"));
    assert!(!html.contains("Enter your username:"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn shell_quiz_timeout_reaches_results_and_records_once() {
    let key = BucketKey::topical(nodejs(), Difficulty::Easy);
    let mut harness = setup_view_harness_with_settings(
        ViewKind::Shell(Screen::Quiz { key }),
        QuizSettings::new(2, 0).unwrap(),
    );
    harness.rebuild();

    let html = harness.drive_until("Question 1 / 3").await;
    assert!(html.contains("0:02"));

    let html = harness.drive_rounds_until("Quiz Complete!", 200).await;
    assert!(html.contains("Quiz Complete!"));
    assert!(html.contains("Your Score: 0 / 3"));

    for _ in 0..60 {
        harness.drive_async().await;
    }
    assert_eq!(harness.app.history().history().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn shell_empty_bucket_alerts_and_returns_to_difficulty() {
    let key = BucketKey::topical(Topic::new("cobol").unwrap(), Difficulty::Easy);
    let mut harness = setup_view_harness_with_settings(
        ViewKind::Shell(Screen::Quiz { key }),
        QuizSettings::new(2, 0).unwrap(),
    );
    harness.rebuild();

    let html = harness.drive_until("Select a Difficulty").await;
    assert!(html.contains(NO_QUESTIONS));
    assert!(!html.contains("Loading questions..."));

    for _ in 0..60 {
        harness.drive_async().await;
    }
    assert!(harness.app.history().history().await.unwrap().is_empty());
}
