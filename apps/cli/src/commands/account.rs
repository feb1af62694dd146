//! # Account Commands
//!
//! Sign-in, sign-up, sign-out and the current session.

use lnf_client::views::{sign_in, sign_up};
use lnf_core::Session;

use crate::commands::{action_error, print_json, prompt_line, request_scope};
use crate::error::{CliError, CliResult, ErrorCode};
use crate::state::AppState;

pub async fn signin(state: &AppState, username: &str, password: Option<String>) -> CliResult<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_line("Password: ")?,
    };

    let cancel = request_scope();
    let profile = sign_in(&state.auth, &state.api, username, &password, &cancel)
        .await
        .map_err(|message| action_error(&message))?;

    println!("Login successful!");
    println!("Signed in as {} (#{})", profile.username, profile.id);
    Ok(())
}

pub async fn signup(
    state: &AppState,
    username: &str,
    email: &str,
    password: Option<String>,
    confirm: Option<String>,
) -> CliResult<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_line("Password: ")?,
    };
    let confirm = match confirm {
        Some(confirm) => confirm,
        None => prompt_line("Confirm password: ")?,
    };

    let cancel = request_scope();
    let outcome = sign_up(&state.api, username, email, &password, &confirm, &cancel)
        .await
        .map_err(|message| action_error(&message))?;

    if outcome.accepted {
        println!("{}", outcome.message);
        println!("You can now sign in with `lnf signin {}`", username);
        Ok(())
    } else {
        Err(CliError::new(ErrorCode::RequestFailed, outcome.message))
    }
}

pub async fn signout(state: &AppState) -> CliResult<()> {
    state.auth.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(state: &AppState, json: bool) -> CliResult<()> {
    let session = state.auth.session().await;
    if json {
        return print_json(&session);
    }
    match session {
        Session::Anonymous => println!("Not signed in."),
        Session::Authenticated { profile } => {
            println!("{} (#{})", profile.username, profile.id);
            if let Some(email) = profile.email {
                println!("{}", email);
            }
        }
    }
    Ok(())
}
