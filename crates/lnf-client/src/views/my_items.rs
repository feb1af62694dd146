//! # My Items Page
//!
//! The signed-in user's listings with ALL/LOST/FOUND tabs, inline editing
//! and deletion.
//!
//! ## Mutation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_edit                                                            │
//! │    draft ──► validate ──► PUT /api/items/{id} (bearer)                 │
//! │                 │            ├── 2xx ──► local record := server reply   │
//! │                 │            ├── 403 ──► "You can only edit ..."        │
//! │                 │            ├── 404 ──► "Item not found."              │
//! │                 │            └── else ─► "Failed to update item ..."    │
//! │                 └── missing fields ──► "Please fill in all ..."         │
//! │                                                                         │
//! │  delete                                                                 │
//! │    confirm? ──no──► untouched                                          │
//! │       │yes                                                              │
//! │       └──► DELETE /api/items/{id} (bearer)                             │
//! │               ├── 2xx ──► remove local record                          │
//! │               ├── 403 ──► "You can only delete ..."  (record kept)     │
//! │               └── else ─► "Failed to delete item ..." (record kept)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lnf_core::validation::validate_item_draft;
use lnf_core::{Item, ItemDraft, ItemId, ItemUpdate, SessionProfile, TypeFilter};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{ItemFetcher, ItemMutator};
use crate::auth::AuthStore;
use crate::error::ClientError;
use crate::views::CANCELLED_MESSAGE;

pub const SIGN_IN_REQUIRED: &str = "Please sign in to view your items.";
pub const LOAD_FAILED: &str = "Failed to load your items. Please try again later.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this item?";

pub const UPDATE_FORBIDDEN: &str = "You can only edit your own items.";
pub const UPDATE_NOT_FOUND: &str = "Item not found.";
pub const UPDATE_FAILED: &str = "Failed to update item. Please try again.";
pub const DELETE_FORBIDDEN: &str = "You can only delete your own items.";
pub const DELETE_FAILED: &str = "Failed to delete item. Please try again.";

/// Item being edited and its form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub item_id: ItemId,
    pub draft: ItemDraft,
}

#[derive(Debug, Clone, Default)]
pub struct MyItemsView {
    pub owner: Option<SessionProfile>,
    pub items: Vec<Item>,
    pub filter: TypeFilter,
    pub editing: Option<EditState>,
    pub error: Option<String>,
}

impl MyItemsView {
    /// Loads the signed-in user's items. `None` if cancelled.
    pub async fn load<F: ItemFetcher>(
        api: &F,
        auth: &AuthStore,
        cancel: &CancellationToken,
    ) -> Option<Self> {
        let Some(owner) = auth.profile().await else {
            return Some(MyItemsView {
                error: Some(SIGN_IN_REQUIRED.to_string()),
                ..Default::default()
            });
        };

        match api.list_user_items(owner.id, cancel).await {
            Ok(items) => Some(MyItemsView {
                owner: Some(owner),
                items,
                ..Default::default()
            }),
            Err(ClientError::Cancelled) => None,
            Err(e) => {
                warn!(user_id = owner.id, error = %e, "My items load failed");
                Some(MyItemsView {
                    owner: Some(owner),
                    error: Some(LOAD_FAILED.to_string()),
                    ..Default::default()
                })
            }
        }
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
    }

    /// Items under the selected tab.
    pub fn visible(&self) -> Vec<&Item> {
        self.items.iter().filter(|i| self.filter.matches(i)).collect()
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Opens the edit form seeded from the item. Returns false if the item
    /// is not in this list.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let Some(item) = self.find(id) else {
            return false;
        };
        self.editing = Some(EditState {
            item_id: id,
            draft: ItemDraft::from_item(item),
        });
        true
    }

    pub fn draft_mut(&mut self) -> Option<&mut ItemDraft> {
        self.editing.as_mut().map(|e| &mut e.draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Sends the edit form. On success the local record is replaced by the
    /// server's copy and the form closes.
    pub async fn submit_edit<M: ItemMutator>(
        &mut self,
        api: &M,
        auth: &AuthStore,
        cancel: &CancellationToken,
    ) -> Result<&Item, String> {
        let Some(edit) = self.editing.as_ref() else {
            return Err("No item is being edited.".to_string());
        };
        let Some(owner) = self.owner.as_ref() else {
            return Err(SIGN_IN_REQUIRED.to_string());
        };

        let fields = validate_item_draft(&edit.draft).map_err(|e| e.to_string())?;
        let update = ItemUpdate::new(fields, owner);
        let token = auth.token().map_err(|e| e.to_string())?;
        let id = edit.item_id;

        let updated = api
            .update_item(id, &update, token.as_deref(), cancel)
            .await
            .map_err(|e| {
                warn!(id, error = %e, "Update failed");
                update_failure_message(&e)
            })?;

        info!(id, "Item updated");
        self.editing = None;
        let index = match self.items.iter().position(|i| i.id == id) {
            Some(index) => {
                self.items[index] = updated;
                index
            }
            None => {
                self.items.push(updated);
                self.items.len() - 1
            }
        };
        Ok(&self.items[index])
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Deletes an item after `confirm` approves it.
    ///
    /// Returns `Ok(false)` when the user declines. The local record is only
    /// removed once the server reports success.
    pub async fn delete<M, C>(
        &mut self,
        api: &M,
        auth: &AuthStore,
        id: ItemId,
        confirm: C,
        cancel: &CancellationToken,
    ) -> Result<bool, String>
    where
        M: ItemMutator,
        C: FnOnce(&Item, &str) -> bool,
    {
        let Some(item) = self.find(id) else {
            return Err(UPDATE_NOT_FOUND.to_string());
        };
        if !confirm(item, DELETE_CONFIRMATION) {
            return Ok(false);
        }

        let token = auth.token().map_err(|e| e.to_string())?;
        api.delete_item(id, token.as_deref(), cancel)
            .await
            .map_err(|e| {
                warn!(id, error = %e, "Delete failed");
                delete_failure_message(&e)
            })?;

        info!(id, "Item deleted");
        self.items.retain(|i| i.id != id);
        if self.editing.as_ref().is_some_and(|e| e.item_id == id) {
            self.editing = None;
        }
        Ok(true)
    }
}

fn update_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Cancelled => CANCELLED_MESSAGE,
        e if e.is_forbidden() => UPDATE_FORBIDDEN,
        e if e.is_not_found() => UPDATE_NOT_FOUND,
        _ => UPDATE_FAILED,
    }
    .to_string()
}

fn delete_failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Cancelled => CANCELLED_MESSAGE,
        e if e.is_forbidden() => DELETE_FORBIDDEN,
        _ => DELETE_FAILED,
    }
    .to_string()
}
