mod app;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod input;
mod leaderboard;
mod menu;
mod ranking;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::ranking::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::util::Globals;
use crate::warning::Warning;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: gridsnake [--config PATH]

Play snake on a grid in the terminal

Options:
      --config PATH   Read configuration from PATH
  -h, --help          Show this help and exit
  -V, --version       Show the program version and exit
";

/// Environment variable from which the log filter is read
const LOG_ENV: &str = "GRIDSNAKE_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Long("config") => config = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config })
    }
}

fn main() -> ExitCode {
    let cli = match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };
    match cli {
        Cli::Help => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Cli::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Cli::Run { config } => match setup(config.as_deref()) {
            Ok(globals) => io_exit(run(globals)),
            Err(e) => {
                eprintln!("gridsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Load the configuration, start logging, and open the ranking
fn setup(config_path: Option<&Path>) -> anyhow::Result<Globals> {
    let config = match config_path {
        Some(path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => match Config::default_path().ok() {
            Some(path) => Config::load(&path, true).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            None => Config::default(),
        },
    };
    if let Some(ref log_file) = config.files.log_file {
        init_logging(log_file)?;
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        rules = ?config.rules,
        mapping = ?config.input.mapping,
        "Starting gridsnake"
    );
    let mut warning = None;
    let store: Box<dyn KeyValueStore> = match config.ranking_file() {
        Some(path) => match JsonFileStore::open(&path) {
            Ok(store) => {
                tracing::debug!(path = %path.display(), "Opened ranking file");
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    path = %path.display(),
                    "Failed to open ranking file; rankings will not be saved"
                );
                warning = Some(Warning::from(e));
                Box::new(MemoryStore::default())
            }
        },
        None => {
            tracing::warn!("Could not determine ranking file path; rankings will not be saved");
            Box::new(MemoryStore::default())
        }
    };
    let mut globals = Globals::new(config, store);
    globals.warning = warning;
    Ok(globals)
}

/// Append log events to `path`, filtered by the `GRIDSNAKE_LOG` environment
/// variable
fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(globals: Globals) -> io::Result<()> {
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture).and_then(|()| App::new(globals).run(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(error = ?e, "Failed to disable mouse capture");
    }
    ratatui::restore();
    r
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Terminal I/O failed");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
