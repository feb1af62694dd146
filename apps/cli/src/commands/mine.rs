//! # My Items Commands
//!
//! Listing, editing and deleting the signed-in user's items.

use lnf_client::views::my_items::{DELETE_CONFIRMATION, SIGN_IN_REQUIRED};
use lnf_client::views::MyItemsView;
use lnf_core::{ItemId, ItemType, TypeFilter};
use tracing::info;

use crate::cli::ItemFieldArgs;
use crate::commands::{action_error, confirm, print_json, request_scope};
use crate::error::{CliError, CliResult, ErrorCode};
use crate::render;
use crate::state::AppState;

/// Loads the page, turning its error text into a CLI error.
async fn load(state: &AppState) -> CliResult<MyItemsView> {
    let cancel = request_scope();
    let mut view = MyItemsView::load(&state.api, &state.auth, &cancel)
        .await
        .ok_or_else(CliError::cancelled)?;

    match view.error.take() {
        None => Ok(view),
        Some(error) if error == SIGN_IN_REQUIRED => {
            Err(CliError::new(ErrorCode::NotSignedIn, error))
        }
        Some(error) => Err(CliError::action(error)),
    }
}

pub async fn list(state: &AppState, filter: TypeFilter, json: bool) -> CliResult<()> {
    let mut view = load(state).await?;
    view.set_filter(filter);

    if json {
        return print_json(&view.visible());
    }

    let visible = view.visible();
    println!("My items ({}): {} of {}", filter, visible.len(), view.items.len());
    if visible.is_empty() {
        println!("{}", lnf_client::views::search::NO_ITEMS);
    } else {
        println!("{}", render::item_list(visible));
    }
    Ok(())
}

pub async fn edit(
    state: &AppState,
    id: ItemId,
    fields: ItemFieldArgs,
    item_type: Option<ItemType>,
    json: bool,
) -> CliResult<()> {
    let mut view = load(state).await?;
    if !view.begin_edit(id) {
        return Err(CliError::not_found(
            lnf_client::views::my_items::UPDATE_NOT_FOUND,
        ));
    }
    if let Some(draft) = view.draft_mut() {
        fields.apply(draft);
        if item_type.is_some() {
            draft.item_type = item_type;
        }
    }

    let cancel = request_scope();
    let updated = view
        .submit_edit(&state.api, &state.auth, &cancel)
        .await
        .map_err(|message| action_error(&message))?;
    info!(id = updated.id, "Edit saved");

    if json {
        return print_json(updated);
    }
    println!("Item updated successfully!");
    println!("{}", render::item_line(updated));
    Ok(())
}

pub async fn delete(state: &AppState, id: ItemId, yes: bool) -> CliResult<()> {
    let mut view = load(state).await?;

    // Ask before the delete request goes out so Ctrl+C at the prompt aborts.
    let approved = match view.find(id) {
        Some(item) if !yes => {
            eprintln!("{}", render::item_line(item));
            confirm(DELETE_CONFIRMATION).await?
        }
        _ => true,
    };

    let cancel = request_scope();
    let deleted = view
        .delete(&state.api, &state.auth, id, |_, _| approved, &cancel)
        .await
        .map_err(|message| action_error(&message))?;

    if deleted {
        println!("Item deleted successfully!");
    } else {
        println!("Nothing deleted.");
    }
    Ok(())
}
