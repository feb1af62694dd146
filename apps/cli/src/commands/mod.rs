//! # Commands Module
//!
//! One function per subcommand. Each builds the page view model, runs it
//! inside a fresh request scope and prints the result.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch, prompts, request scope)
//! ├── browse.rs   ◄─── home, search, show, open
//! ├── mine.rs     ◄─── mine, edit, delete
//! ├── report.rs   ◄─── report-lost, report-found
//! ├── account.rs  ◄─── signin, signup, signout, whoami
//! ├── doctor.rs   ◄─── connectivity check
//! └── config.rs   ◄─── show / save configuration
//! ```
//!
//! ## Request Scope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request_scope() ──► CancellationToken ◄── Ctrl+C watcher              │
//! │         │                                                               │
//! │         └──► view::load(..., &cancel)  ──► None / Cancelled            │
//! │                                             └──► "Request cancelled."   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod browse;
pub mod config;
pub mod doctor;
pub mod mine;
pub mod report;

use std::io::{self, BufRead, Write};

use lnf_client::CancellationToken;
use lnf_core::ItemType;
use serde::Serialize;
use tracing::debug;

use crate::cli::Command;
use crate::error::{CliError, CliResult, ErrorCode};
use crate::state::AppState;

/// Runs one subcommand.
pub async fn dispatch(state: &AppState, command: Command, json: bool) -> CliResult<()> {
    match command {
        Command::Home => browse::home(state, json).await,
        Command::Search(args) => browse::search(state, args, json).await,
        Command::Show { id } => browse::show(state, id, json).await,
        Command::Open { path } => browse::open(state, &path, json).await,
        Command::Mine { filter } => mine::list(state, filter, json).await,
        Command::Edit {
            id,
            fields,
            item_type,
        } => mine::edit(state, id, fields, item_type, json).await,
        Command::Delete { id, yes } => mine::delete(state, id, yes).await,
        Command::ReportLost(args) => report::submit(state, ItemType::Lost, args).await,
        Command::ReportFound(args) => report::submit(state, ItemType::Found, args).await,
        Command::Signin { username, password } => {
            account::signin(state, &username, password).await
        }
        Command::Signup {
            username,
            email,
            password,
            confirm,
        } => account::signup(state, &username, &email, password, confirm).await,
        Command::Signout => account::signout(state).await,
        Command::Whoami => account::whoami(state, json).await,
        Command::Doctor => doctor::run(state).await,
        Command::Config { save } => config::run(state, save, json),
    }
}

/// Fresh cancellation token, cancelled on Ctrl+C.
pub fn request_scope() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl+C received, cancelling request");
            trigger.cancel();
        }
    });
    cancel
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))?;
    println!("{}", text);
    Ok(())
}

/// Reads one line from stdin after printing `prompt` to stderr.
pub fn prompt_line(prompt: &str) -> CliResult<String> {
    eprint!("{}", prompt);
    io::stderr()
        .flush()
        .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Yes/no question, defaulting to no. Ctrl+C aborts it.
pub async fn confirm(question: &str) -> CliResult<bool> {
    let question = format!("{} [y/N] ", question);
    confirm_with(&request_scope(), move || prompt_line(&question)).await
}

/// Runs `read` on its own thread and races the answer against `cancel`.
///
/// Not `spawn_blocking`: runtime shutdown waits for blocking-pool tasks,
/// so a pending `read_line` there keeps the process alive after Ctrl+C.
async fn confirm_with<R>(cancel: &CancellationToken, read: R) -> CliResult<bool>
where
    R: FnOnce() -> CliResult<String> + Send + 'static,
{
    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let _ = tx.send(read());
    });

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CliError::cancelled()),
        answer = rx => match answer {
            Ok(answer) => Ok(is_yes(&answer?)),
            Err(_) => Err(CliError::new(ErrorCode::Internal, "prompt thread exited")),
        },
    }
}

/// Picks the error code for a failed page action from its message.
pub fn action_error(message: &str) -> CliError {
    use lnf_client::views::my_items::{DELETE_FORBIDDEN, UPDATE_FORBIDDEN, UPDATE_NOT_FOUND};
    use lnf_client::views::CANCELLED_MESSAGE;
    use lnf_core::ValidationError;

    let code = match message {
        UPDATE_FORBIDDEN | DELETE_FORBIDDEN => ErrorCode::Forbidden,
        UPDATE_NOT_FOUND => ErrorCode::NotFound,
        CANCELLED_MESSAGE => ErrorCode::Cancelled,
        m if m == ValidationError::MissingFields { fields: Vec::new() }.to_string()
            || m == ValidationError::PasswordMismatch.to_string() =>
        {
            ErrorCode::ValidationError
        }
        m if m == lnf_core::CoreError::NotSignedIn.to_string() => ErrorCode::NotSignedIn,
        _ => ErrorCode::RequestFailed,
    };
    CliError::new(code, message)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[tokio::test]
    async fn test_confirm_reads_answer() {
        let cancel = CancellationToken::new();
        assert!(confirm_with(&cancel, || Ok("yes".to_string())).await.unwrap());
        assert!(!confirm_with(&cancel, || Ok(String::new())).await.unwrap());
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_confirm() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = confirm_with(&cancel, || {
            std::thread::sleep(std::time::Duration::from_secs(2));
            Ok("y".to_string())
        })
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Cancelled);
    }

    #[test]
    fn test_action_error_codes() {
        assert_eq!(action_error("You can only edit your own items.").code, ErrorCode::Forbidden);
        assert_eq!(action_error("You can only delete your own items.").code, ErrorCode::Forbidden);
        assert_eq!(action_error("Item not found.").code, ErrorCode::NotFound);
        assert_eq!(action_error("Request cancelled.").code, ErrorCode::Cancelled);
        assert_eq!(
            action_error("Please fill in all required fields.").code,
            ErrorCode::ValidationError
        );
        assert_eq!(action_error("Passwords do not match").code, ErrorCode::ValidationError);
        assert_eq!(action_error("Please sign in to continue.").code, ErrorCode::NotSignedIn);
        assert_eq!(
            action_error("Failed to delete item. Please try again.").code,
            ErrorCode::RequestFailed
        );
    }
}
