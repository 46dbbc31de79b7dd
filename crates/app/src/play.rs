//! Terminal quiz: one session driven by the background countdown, answers
//! read from stdin by number.

use quiz_core::model::{BucketKey, HistoryEntry};
use quiz_core::session::AnswerOutcome;
use services::{AppServices, LiveQuiz, LiveStart};
use tokio::io::{AsyncBufReadExt, BufReader};
use ui::vm::{format_clock, map_results};

pub async fn run(app: &AppServices, key: BucketKey) -> Result<(), Box<dyn std::error::Error>> {
    let live = match LiveQuiz::start(app.quiz(), key).await {
        LiveStart::Running(live) => live,
        LiveStart::Unavailable(key) => {
            println!("No questions available for {key}.");
            return Ok(());
        }
    };
    let mut done = live.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Some(entry) = live.completion() {
            print_results(&entry);
            return Ok(());
        }

        let session = live.snapshot().await;
        let options: Vec<String> = match session.current_question() {
            Some(question) => {
                println!();
                println!(
                    "Question {} / {}  [{}]",
                    session.position() + 1,
                    session.question_count(),
                    format_clock(session.remaining_secs())
                );
                println!("{}", question.prompt());
                for (index, option) in question.options().iter().enumerate() {
                    println!("  {}) {option}", index + 1);
                }
                question.options().to_vec()
            }
            None => Vec::new(),
        };

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("Quiz abandoned.");
                    return Ok(());
                };
                let Some(option) = pick_option(&options, &line) else {
                    println!("Enter a number between 1 and {}.", options.len());
                    continue;
                };
                match live.answer(option).await {
                    Ok(AnswerOutcome::Recorded { correct: true, .. }) => println!("Correct!"),
                    Ok(AnswerOutcome::Recorded { correct_option, .. }) => {
                        println!("Wrong. The answer was: {correct_option}");
                    }
                    Ok(AnswerOutcome::Ignored) => {}
                    Err(err) => tracing::error!(error = %err, "answer could not be recorded"),
                }
            }
            changed = done.changed() => {
                if changed.is_ok() {
                    println!();
                    println!("Time's up!");
                }
            }
        }
    }
}

fn pick_option<'a>(options: &'a [String], line: &str) -> Option<&'a str> {
    let choice: usize = line.trim().parse().ok()?;
    options.get(choice.checked_sub(1)?).map(String::as_str)
}

fn print_results(entry: &HistoryEntry) {
    let vm = map_results(entry);
    println!();
    println!("Quiz Complete! {}", vm.bucket);
    println!("{}%", vm.percentage);
    println!("{}", vm.score_line);
    println!("{}", vm.time_line);
    println!("{}", vm.date_line);
}
