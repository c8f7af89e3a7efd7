use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use practice_core::curricula::Grade;
use practice_core::model::{EngineSettings, ProfileId};
use services::PracticeLoopService;
use storage::repository::Storage;
use tracing_subscriber::{EnvFilter, fmt as log_fmt, prelude::*};

mod terminal;

const DEFAULT_DB_URL: &str = "sqlite:practice.sqlite3";
const DEFAULT_PROFILE: &str = "learner";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidProfile { raw: String },
    InvalidGrade { raw: String },
    InvalidDuration { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidProfile { raw } => {
                write!(f, "invalid --profile value (letters, digits, - and _): {raw}")
            }
            ArgsError::InvalidGrade { raw } => {
                write!(f, "invalid --grade value (expected year6 or year9): {raw}")
            }
            ArgsError::InvalidDuration { raw } => {
                write!(f, "invalid --duration value (seconds > 0): {raw}")
            }
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Practice,
    Report,
    Reset,
    Quiz,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "practice" => Some(Self::Practice),
            "report" => Some(Self::Report),
            "reset" => Some(Self::Reset),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
struct Args {
    command: Command,
    db_url: String,
    profile: ProfileId,
    grade: Grade,
    duration_secs: Option<u32>,
    diagram_dir: Option<PathBuf>,
    verbose: bool,
    help: bool,
}

impl Args {
    /// Parse `argv` (without the program name) on top of environment defaults.
    fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("PRACTICE_DB_URL").unwrap_or_else(|| DEFAULT_DB_URL.into());
        let mut profile = env("PRACTICE_PROFILE")
            .and_then(|value| ProfileId::new(value).ok())
            .map_or_else(|| ProfileId::new(DEFAULT_PROFILE), Ok)
            .map_err(|_| ArgsError::InvalidProfile {
                raw: DEFAULT_PROFILE.into(),
            })?;
        let mut grade = env("PRACTICE_GRADE")
            .and_then(|value| value.parse::<Grade>().ok())
            .unwrap_or_default();
        let mut duration_secs = env("PRACTICE_DURATION_SECS")
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|secs| *secs > 0);
        let mut diagram_dir = env("PRACTICE_DIAGRAM_DIR").map(PathBuf::from);
        let mut verbose = false;
        let mut help = false;

        let mut args = argv.into_iter().peekable();
        let command = match args.peek().map(String::as_str) {
            Some(first) if !first.starts_with('-') => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_owned()))?;
                args.next();
                command
            }
            _ => Command::Practice,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--profile" => {
                    let value = require_value(&mut args, "--profile")?;
                    profile = ProfileId::new(value.as_str())
                        .map_err(|_| ArgsError::InvalidProfile { raw: value.clone() })?;
                }
                "--grade" => {
                    let value = require_value(&mut args, "--grade")?;
                    grade = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGrade { raw: value.clone() })?;
                }
                "--duration" => {
                    let value = require_value(&mut args, "--duration")?;
                    let secs = value
                        .parse::<u32>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or_else(|| ArgsError::InvalidDuration { raw: value.clone() })?;
                    duration_secs = Some(secs);
                }
                "--diagram-dir" => {
                    let value = require_value(&mut args, "--diagram-dir")?;
                    diagram_dir = Some(PathBuf::from(value));
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            command,
            db_url: normalize_sqlite_url(db_url),
            profile,
            grade,
            duration_secs,
            diagram_dir,
            verbose,
            help,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  practice [practice] [options]   # timed adaptive session (default)");
    eprintln!("  practice report     [options]   # mastery per category");
    eprintln!("  practice reset      [options]   # forget stored progress");
    eprintln!("  practice quiz                   # fixed biology quiz");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>      default {DEFAULT_DB_URL}");
    eprintln!("  --profile <name>       default {DEFAULT_PROFILE}");
    eprintln!("  --grade <year6|year9>  default year9");
    eprintln!("  --duration <seconds>   default 1800");
    eprintln!("  --diagram-dir <dir>    write question diagrams as .svg files");
    eprintln!("  --verbose              debug logging on stderr");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PRACTICE_DB_URL, PRACTICE_PROFILE, PRACTICE_GRADE, PRACTICE_DURATION_SECS,");
    eprintln!("  PRACTICE_DIAGRAM_DIR, RUST_LOG");
}

fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
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

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter = if verbose {
        EnvFilter::new(default_filter)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;
    if args.help {
        print_usage();
        return Ok(());
    }
    init_tracing(args.verbose);

    if args.command == Command::Quiz {
        return terminal::run_quiz().await;
    }

    // Open + migrate SQLite here so the library crates stay free of filesystem glue.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;

    let mut settings = EngineSettings::default();
    if let Some(secs) = args.duration_secs {
        settings = settings.with_session_duration(secs)?;
    }
    let catalog = Arc::new(args.grade.catalog()?);
    let service = PracticeLoopService::new(catalog, args.grade.as_str(), settings, &storage);
    tracing::debug!(grade = %args.grade, profile = %args.profile, "configured");

    match args.command {
        Command::Practice => {
            terminal::run_practice(&service, &args.profile, args.diagram_dir.as_deref()).await
        }
        Command::Report => {
            terminal::print_report(&service.progress_report(&args.profile).await);
            Ok(())
        }
        Command::Reset => terminal::run_reset(&service, &args.profile).await,
        Command::Quiz => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
