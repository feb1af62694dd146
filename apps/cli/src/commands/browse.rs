//! # Browse Commands
//!
//! Read-only pages: home, search, item detail, and `open` which routes a
//! path to the matching page.

use lnf_client::views::{HomeView, ItemDetailView, Route, SearchView};
use serde_json::json;
use tracing::info;

use crate::cli::SearchArgs;
use crate::commands::{mine, print_json, request_scope};
use crate::error::{CliError, CliResult, ErrorCode};
use crate::render;
use crate::state::AppState;

pub async fn home(state: &AppState, json: bool) -> CliResult<()> {
    let cancel = request_scope();
    let view = HomeView::load(&state.api, &cancel)
        .await
        .ok_or_else(CliError::cancelled)?;
    if let Some(error) = view.error {
        return Err(CliError::action(error));
    }

    if json {
        return print_json(&json!({
            "foundCount": view.found_count(),
            "lostCount": view.lost_count(),
            "recent": view.recent(),
        }));
    }

    println!("Found items: {}", view.found_count());
    println!("Lost items:  {}", view.lost_count());
    println!();
    if view.recent().is_empty() {
        println!("{}", lnf_client::views::search::NO_ITEMS);
    } else {
        println!("Recent items:");
        println!("{}", render::item_list(view.recent()));
    }
    Ok(())
}

pub async fn search(state: &AppState, args: SearchArgs, json: bool) -> CliResult<()> {
    let cancel = request_scope();
    let mut view = SearchView::load(&state.api, args.query.as_deref(), &cancel)
        .await
        .ok_or_else(CliError::cancelled)?;
    if let Some(error) = view.error.take() {
        return Err(CliError::action(error));
    }
    view.set_category(args.category);
    view.set_type(args.item_type);
    info!(visible = view.visible().len(), total = view.items.len(), "Search complete");

    if json {
        return print_json(&view.visible());
    }

    println!("{}", view.summary());
    match view.empty_message() {
        Some(message) => println!("{}", message),
        None => println!("{}", render::item_list(view.visible())),
    }
    Ok(())
}

pub async fn show(state: &AppState, id: i64, json: bool) -> CliResult<()> {
    let cancel = request_scope();
    let view = ItemDetailView::load(&state.api, id, &cancel)
        .await
        .ok_or_else(CliError::cancelled)?;

    match (&view.item, view.message()) {
        (Some(item), None) if json => print_json(item),
        (Some(item), None) => {
            println!("{}", render::item_card(item));
            Ok(())
        }
        (_, message) => Err(detail_error(
            view.not_found,
            message.unwrap_or(lnf_client::views::detail::NOT_FOUND),
        )),
    }
}

/// A 404 is a missing item. Any other load failure is a failed request.
fn detail_error(not_found: bool, message: &str) -> CliError {
    if not_found {
        CliError::not_found(message)
    } else {
        CliError::action(message)
    }
}

/// Opens a page by path, honouring the sign-in guard.
pub async fn open(state: &AppState, path: &str, json: bool) -> CliResult<()> {
    let session = state.auth.session().await;
    let route = Route::parse(path).guard(&session);
    info!(%route, "Opening page");

    match route {
        Route::Home => home(state, json).await,
        Route::Search { query } => {
            let args = SearchArgs {
                query,
                category: None,
                item_type: None,
            };
            search(state, args, json).await
        }
        Route::ItemDetail { id } => show(state, id, json).await,
        Route::MyItems => mine::list(state, Default::default(), json).await,
        Route::ReportLost => {
            println!("Report a lost item with `lnf report-lost --title .. --description .. --category .. --location .. --date YYYY-MM-DD --contact ..`");
            Ok(())
        }
        Route::ReportFound => {
            println!("Report a found item with `lnf report-found --title .. --description .. --category .. --location .. --date YYYY-MM-DD --contact ..`");
            Ok(())
        }
        Route::SignIn { from } => {
            let mut message = "Please sign in with `lnf signin <username>`".to_string();
            if let Some(from) = from {
                message.push_str(&format!(", then open {} again", from));
            }
            Err(CliError::new(ErrorCode::NotSignedIn, message))
        }
        Route::SignUp => {
            println!("Create an account with `lnf signup <username> <email>`");
            Ok(())
        }
        Route::NotFound { path } => Err(CliError::not_found(format!(
            "Page Not Found: {}. Oops! It looks like this page has gone missing, just like a lost item.",
            path
        ))),
    }
}
