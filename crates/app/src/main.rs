use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{BucketKey, Difficulty, QuizSettings, Topic};
use services::{AppServices, Clock};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

mod play;

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTimeLimit { raw: String },
    InvalidTopic { raw: String },
    InvalidDifficulty { raw: String },
    MissingFile { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTimeLimit { raw } => write!(f, "invalid --time-limit value: {raw}"),
            ArgsError::InvalidTopic { raw } => write!(f, "invalid --topic value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw} (expected easy, medium or hard)")
            }
            ArgsError::MissingFile { command } => write!(f, "{command} requires a file path"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--db <sqlite_url>] [--time-limit <secs>] [--bundle <path>]");
    eprintln!("  cargo run -p app -- play   --difficulty <level> [--topic <name>] [common flags]");
    eprintln!("  cargo run -p app -- import <file.json> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- export <file.json> [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --time-limit {}", QuizSettings::DEFAULT_TIME_LIMIT_SECS);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_TIME_LIMIT_SECS, QUIZ_BUNDLE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Play,
    Import,
    Export,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "play" => Some(Self::Play),
            "import" => Some(Self::Import),
            "export" => Some(Self::Export),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Play => "play",
            Self::Import => "import",
            Self::Export => "export",
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    settings: QuizSettings,
    bundle: Option<PathBuf>,
    topic: Option<Topic>,
    difficulty: Option<Difficulty>,
    file: Option<PathBuf>,
}

impl Args {
    fn parse(
        command: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("QUIZ_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut settings = match env("QUIZ_TIME_LIMIT_SECS") {
            Some(raw) => parse_time_limit(raw)?,
            None => QuizSettings::default(),
        };
        let mut bundle = env("QUIZ_BUNDLE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut topic = None;
        let mut difficulty = None;
        let mut file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--time-limit" => {
                    settings = parse_time_limit(require_value(args, "--time-limit")?)?;
                }
                "--bundle" => {
                    bundle = Some(PathBuf::from(require_value(args, "--bundle")?));
                }
                "--topic" => {
                    let value = require_value(args, "--topic")?;
                    topic = Some(
                        Topic::new(value.clone()).map_err(|_| ArgsError::InvalidTopic { raw: value })?,
                    );
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    difficulty = Some(
                        value
                            .parse::<Difficulty>()
                            .map_err(|_| ArgsError::InvalidDifficulty { raw: value.clone() })?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if !arg.starts_with("--")
                    && file.is_none()
                    && matches!(command, Command::Import | Command::Export) =>
                {
                    file = Some(PathBuf::from(arg));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if matches!(command, Command::Import | Command::Export) && file.is_none() {
            return Err(ArgsError::MissingFile {
                command: command.name(),
            });
        }
        if command == Command::Play && difficulty.is_none() {
            return Err(ArgsError::MissingValue {
                flag: "--difficulty",
            });
        }

        Ok(Self {
            db_url,
            settings,
            bundle,
            topic,
            difficulty,
            file,
        })
    }

    fn bucket(&self) -> Option<BucketKey> {
        self.difficulty
            .map(|difficulty| BucketKey::new(self.topic.clone(), difficulty))
    }
}

fn parse_time_limit(raw: String) -> Result<QuizSettings, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|secs| {
            QuizSettings::new(secs, QuizSettings::DEFAULT_ANSWER_REVEAL_MS).ok()
        })
        .ok_or(ArgsError::InvalidTimeLimit { raw })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the desktop app.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(
        &parsed.db_url,
        Clock::default_clock(),
        parsed.settings,
        parsed.bundle.clone(),
    )
    .await?;
    tracing::info!(db = %parsed.db_url, command = cmd.name(), "services ready");

    match cmd {
        Command::Ui => {
            let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let app: Arc<dyn UiApp> = Arc::new(app);
            let context = build_app_context(&app).with_export_dir(export_dir);

            // Some desktop setups default to an always-on-top window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Trivia Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Play => {
            let Some(key) = parsed.bucket() else {
                return Err(ArgsError::MissingValue {
                    flag: "--difficulty",
                }
                .into());
            };
            play::run(&app, key).await
        }
        Command::Import => {
            let path = parsed.file.ok_or(ArgsError::MissingFile { command: "import" })?;
            let bank = app.bank().import_file(&path).await?;
            let topics: Vec<String> = bank.topics().map(Topic::display_name).collect();
            eprintln!("imported {}; topics now: {}", path.display(), topics.join(", "));
            Ok(())
        }
        Command::Export => {
            let path = parsed.file.ok_or(ArgsError::MissingFile { command: "export" })?;
            app.bank().export_to(&path).await?;
            eprintln!("exported questions to {}", path.display());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
