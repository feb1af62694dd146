//! Connectivity check against the configured backend.

use std::time::Instant;

use lnf_client::{ClientConfig, ItemFetcher};

use crate::commands::request_scope;
use crate::error::{CliError, CliResult, ErrorCode};
use crate::state::AppState;

pub async fn run(state: &AppState) -> CliResult<()> {
    let config_path = state
        .config_path
        .clone()
        .or_else(ClientConfig::default_config_path);
    println!("Backend:  {}", state.api.base_url());
    match config_path {
        Some(path) if path.exists() => println!("Config:   {}", path.display()),
        Some(path) => println!("Config:   {} (not found, using defaults)", path.display()),
        None => println!("Config:   (no config directory)"),
    }
    match state.config.session_path() {
        Ok(path) => println!("Sessions: {}", path.display()),
        Err(e) => println!("Sessions: {}", e),
    }
    match state.auth.profile().await {
        Some(profile) => println!("Session:  {} (#{})", profile.username, profile.id),
        None => println!("Session:  not signed in"),
    }

    let cancel = request_scope();
    let started = Instant::now();
    let items = state.api.list_items(&cancel).await.map_err(|e| {
        let err = CliError::from(e);
        match err.code {
            ErrorCode::Cancelled => err,
            _ => CliError::new(
                ErrorCode::NetworkError,
                format!("Backend unreachable: {}", err.message),
            ),
        }
    })?;

    println!(
        "Items:    {} listed in {} ms",
        items.len(),
        started.elapsed().as_millis()
    );
    println!("OK");
    Ok(())
}
