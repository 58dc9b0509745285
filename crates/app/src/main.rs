use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AttemptHistoryService, Clock, QuizLoopService, RandomSource};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn history(&self) -> Arc<AttemptHistoryService> {
        self.services.history()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --seed <none: shuffles from OS entropy>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SEED, RUST_LOG");
}

impl Args {
    fn random_source(&self) -> RandomSource {
        self.seed.map_or(RandomSource::Default, RandomSource::seeded)
    }
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

/// Flags win over the environment values.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    env_db_url: Option<String>,
    env_seed: Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut db_url = env_db_url.map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
    let mut seed = env_seed.map(parse_seed).transpose()?;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                db_url = normalize_sqlite_url(value);
            }
            "--seed" => {
                let value = require_value(args, "--seed")?;
                seed = Some(parse_seed(value)?);
            }
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Parsed::Run(Args { db_url, seed }))
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
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
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
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = parse_args(
        &mut argv,
        std::env::var("QUIZ_DB_URL").ok(),
        std::env::var("QUIZ_SEED").ok(),
    )
    .inspect_err(|e| {
        eprintln!("{e}");
        print_usage();
    })?;

    let args = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing();

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services =
        AppServices::new_sqlite(&args.db_url, Clock::default_clock(), args.random_source())
            .await?;
    tracing::info!(db = %args.db_url, seeded = args.seed.is_some(), "starting quiz app");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("PM Quiz Studio")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env_db: Option<&str>, env_seed: Option<&str>) -> Result<Parsed, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        parse_args(&mut iter, env_db.map(str::to_string), env_seed.map(str::to_string))
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let parsed = parse(&[], None, None).unwrap();
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                db_url: DEFAULT_DB_URL.into(),
                seed: None,
            })
        );
    }

    #[test]
    fn flags_override_env() {
        let parsed = parse(
            &["--db", "sqlite::memory:", "--seed", "9"],
            Some("sqlite://env.sqlite3"),
            Some("1"),
        )
        .unwrap();
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                db_url: "sqlite::memory:".into(),
                seed: Some(9),
            })
        );
    }

    #[test]
    fn env_seed_is_used() {
        let Parsed::Run(args) = parse(&[], None, Some(" 42 ")).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(args.random_source(), RandomSource::Seeded(42));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse(&["--seed", "x"], None, None), Err(ArgsError::InvalidSeed { .. })));
        assert!(matches!(parse(&["--db"], None, None), Err(ArgsError::MissingValue { .. })));
        assert!(matches!(parse(&["--db", " "], None, None), Err(ArgsError::InvalidDbUrl { .. })));
        assert!(matches!(parse(&["--topic"], None, None), Err(ArgsError::UnknownArg(_))));
        assert_eq!(parse(&["--help"], None, None).unwrap(), Parsed::Help);
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/quiz.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/quiz.sqlite3"), "{url}");
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
