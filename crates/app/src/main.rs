use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ADVANCE_DELAY, BACKEND_URL_ENV, BackendConfig, DEFAULT_BACKEND_URL, HttpQuizBackend,
    InMemoryQuizBackend, QuizBackend,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const LOG_ENV: &str = "QUIZ_LOG";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBackendUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBackendUrl { raw } => write!(f, "invalid --backend value: {raw}"),
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
    backend: Arc<dyn QuizBackend>,
    backend_label: String,
}

impl UiApp for DesktopApp {
    fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend)
    }

    fn advance_delay(&self) -> Duration {
        ADVANCE_DELAY
    }

    fn backend_label(&self) -> String {
        self.backend_label.clone()
    }
}

struct Args {
    backend_url: Option<String>,
    offline: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--backend <url>] [--offline]");
    eprintln!("  cargo run -p app -- users [--backend <url>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend {DEFAULT_BACKEND_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {BACKEND_URL_ENV}, {LOG_ENV} (falls back to RUST_LOG)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Users,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "users" => Some(Self::Users),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend_url = None;
        let mut offline = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend" => {
                    let value = require_value(args, "--backend")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBackendUrl { raw: value });
                    }
                    backend_url = Some(value);
                }
                "--offline" => offline = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            backend_url,
            offline,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .init();
}

fn connect(args: &Args) -> Result<(Arc<dyn QuizBackend>, String), Box<dyn std::error::Error>> {
    if args.offline {
        tracing::info!("using the offline demo backend");
        return Ok((
            Arc::new(InMemoryQuizBackend::demo()),
            "Offline demo".to_string(),
        ));
    }

    let config = match args.backend_url.as_deref() {
        Some(raw) => BackendConfig::new(raw)?,
        None => BackendConfig::from_env()?,
    };
    let label = config.base_url.to_string();
    tracing::info!(backend = %label, "using HTTP backend");
    Ok((Arc::new(HttpQuizBackend::new(config)), label))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
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
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let (backend, backend_label) = connect(&parsed)?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                backend,
                backend_label,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Users => {
            let users = backend.list_users().await?;
            if users.is_empty() {
                eprintln!("{backend_label}: no users");
            }
            for user in users {
                println!("{user}");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
