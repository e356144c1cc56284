//! # st - Student Task Hub
//!
//! A terminal task manager for academic work. Add tasks with a priority,
//! category and due date, then filter, search and sort them while a header
//! keeps track of overall progress and overdue work.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive UI with a few starter tasks
//! st
//!
//! # Start from an empty list, showing only active tasks by priority
//! st ui --empty --status active --sort priority
//!
//! # Print what the list view would show, as a table or JSON
//! st list --search math
//! st list --hide-completed --json
//!
//! # Progress and overdue count
//! st stats
//! ```
//!
//! Tasks live for the session only; nothing is saved to disk. Set `RUST_LOG`
//! to adjust logging and pass `--log-file` to capture logs from the UI.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt::format::FmtSpan, EnvFilter};

pub mod cli;
pub mod cmd;
pub mod dates;
pub mod error;
pub mod fields;
pub mod session;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod notice;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui {
        criteria: CriteriaArgs::default(),
    });

    // The UI owns the terminal, so it only logs when given a file.
    let interactive = matches!(command, Commands::Ui { .. });
    if let Err(e) = install_tracing(cli.log_file.as_deref(), interactive) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    let result = match command {
        Commands::Ui { criteria } => cmd_ui(criteria),
        Commands::List { criteria, json } => cmd_list(criteria, json),
        Commands::Stats { empty, json } => cmd_stats(empty, json),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn install_tracing(log_file: Option<&Path>, interactive: bool) -> std::io::Result<()> {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(spec.as_deref());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None if !interactive => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
        None => {}
    }
    Ok(())
}

/// Filter from a `RUST_LOG`-style spec, INFO when the spec is absent or names no level.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(spec.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || tracing::enabled!(tracing::Level::DEBUG))
    }

    #[test]
    fn rust_log_level_is_respected() {
        let filter = log_filter(Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(debug_enabled(log_filter(Some("debug"))));
    }

    #[test]
    fn missing_spec_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert!(!debug_enabled(log_filter(None)));
        assert!(!debug_enabled(log_filter(Some(""))));
    }
}
