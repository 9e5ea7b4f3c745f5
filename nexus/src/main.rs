//! `nexus` — mission tracker with rank progression.
//!
//! Runs one command per invocation against the task list stored under the
//! data directory. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/nexus/config.toml`).
//!
//! ```bash
//! nexus add "Scout perimeter" --priority high
//! nexus list --query scout --filter active
//! nexus toggle 0190a1b2
//! nexus rank
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use nexus::app::App;
use nexus::config::{AppConfig, CliArgs};
use nexus::storage::{FileStore, KvPersistence};
use nexus::tasks::TaskStore;

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    // An explicit --config must load; a broken default file only drops the
    // file layer.
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) if cli.config.is_some() => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::from_cli(&cli)
        }
    };

    // Logs go to a file so stdout carries only command output.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(data_dir = %config.data_dir.display(), "nexus starting");

    let persistence = KvPersistence::new(FileStore::new(&config.data_dir));
    let store = match TaskStore::open(persistence) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "could not open mission store");
            eprintln!("Error: could not open mission store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(store, config);
    let command = cli.command.unwrap_or_default();
    match app.execute(command) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_no_op() => {
            tracing::info!(error = %e, "nothing changed");
            eprintln!("{e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(error = %e, "command rejected");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, which carries command output).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("nexus.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
