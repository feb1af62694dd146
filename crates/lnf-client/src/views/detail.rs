//! Item detail page.

use lnf_core::{Item, ItemId};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::api::ItemFetcher;
use crate::error::ClientError;

pub const LOAD_FAILED: &str = "Failed to load item details. Please try again later.";
pub const NOT_FOUND: &str = "Item not found.";

#[derive(Debug, Clone, Default)]
pub struct ItemDetailView {
    pub item: Option<Item>,
    pub error: Option<String>,
    /// The backend answered 404 for this id.
    pub not_found: bool,
}

impl ItemDetailView {
    pub async fn load<F: ItemFetcher>(
        api: &F,
        id: ItemId,
        cancel: &CancellationToken,
    ) -> Option<Self> {
        match api.get_item(id, cancel).await {
            Ok(item) => Some(ItemDetailView {
                item: Some(item),
                ..Default::default()
            }),
            Err(ClientError::Cancelled) => None,
            Err(e) => {
                warn!(id, error = %e, "Item detail load failed");
                Some(ItemDetailView {
                    item: None,
                    error: Some(LOAD_FAILED.to_string()),
                    not_found: e.is_not_found(),
                })
            }
        }
    }

    /// Text to show instead of the item, if any.
    pub fn message(&self) -> Option<&str> {
        match (&self.item, &self.error) {
            (_, Some(error)) => Some(error),
            (None, None) => Some(NOT_FOUND),
            (Some(_), None) => None,
        }
    }
}
