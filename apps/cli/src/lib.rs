//! # Lost & Found CLI
//!
//! `lnf`: the campus Lost & Found pages as subcommands.
//!
//! ## Module Organization
//! ```text
//! lnf_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument tree
//! ├── state.rs        ◄─── AppState (config, HTTP client, session)
//! ├── render.rs       ◄─── Plain-text item lines and cards
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch, prompts, request scope
//! │   ├── browse.rs   ◄─── home, search, show, open
//! │   ├── mine.rs     ◄─── mine, edit, delete
//! │   ├── report.rs   ◄─── report-lost, report-found
//! │   ├── account.rs  ◄─── signin, signup, signout, whoami
//! │   ├── doctor.rs   ◄─── connectivity check
//! │   └── config.rs   ◄─── show / save configuration
//! └── error.rs        ◄─── CLI error type and exit codes
//! ```
//!
//! ## Output Channels
//! Results go to stdout. Logs, prompts and errors go to stderr, so
//! `lnf --json search phone | jq` stays clean.

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::{CliError, ErrorCode};
use state::AppState;

/// Runs the command line application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments          (clap exits on --help / bad input)        │
/// │  2. init_tracing()           (RUST_LOG or "warn,lnf=info")             │
/// │  3. AppState::init           (config → HTTP client → session)          │
/// │  4. commands::dispatch       (one page view model)                     │
/// │  5. Error → stderr (or JSON) and a per-category exit code              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let state = match AppState::init(cli.config.clone(), cli.api_url.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("error: {:#}", e);
            return ErrorCode::ConfigError.exit_code();
        }
    };
    debug!(base_url = %state.api.base_url(), "Client ready");

    match commands::dispatch(&state, cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err, cli.json),
    }
}

fn report_error(err: &CliError, json: bool) -> ExitCode {
    let rendered = if json {
        serde_json::to_string(err).ok()
    } else {
        None
    };
    match rendered {
        Some(text) => eprintln!("{}", text),
        None => eprintln!("error: {}", err),
    }
    err.code.exit_code()
}

/// Logs to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,lnf=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
