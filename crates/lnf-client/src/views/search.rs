//! # Search Page
//!
//! Loads every item once, then narrows it locally as the user types or
//! picks a category/type. Changing a predicate never refetches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   ?q=wallet ──► ItemQuery.text                                         │
//! │                     │                                                   │
//! │   items (server) ───┴──► filter_items ──► visible                      │
//! │                                            "Showing N of M items"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lnf_core::{filter_items, Item, ItemCategory, ItemQuery, ItemType};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::ItemFetcher;
use crate::error::ClientError;
use crate::views::home::LOAD_FAILED;

/// Empty-state text when a predicate is set.
pub const NO_MATCHES: &str = "No items match your search criteria.";
/// Empty-state text when nothing is filtered.
pub const NO_ITEMS: &str = "No items found.";

#[derive(Debug, Clone, Default)]
pub struct SearchView {
    pub items: Vec<Item>,
    pub query: ItemQuery,
    pub error: Option<String>,
}

impl SearchView {
    /// Loads every item with the text predicate seeded from `?q=`.
    pub async fn load<F: ItemFetcher>(
        api: &F,
        initial_text: Option<&str>,
        cancel: &CancellationToken,
    ) -> Option<Self> {
        let query = ItemQuery::new().with_text(initial_text.unwrap_or_default());
        match api.list_items(cancel).await {
            Ok(items) => {
                debug!(count = items.len(), text = %query.text, "Search page loaded");
                Some(SearchView {
                    items,
                    query,
                    error: None,
                })
            }
            Err(ClientError::Cancelled) => None,
            Err(e) => {
                warn!(error = %e, "Search page load failed");
                Some(SearchView {
                    items: Vec::new(),
                    query,
                    error: Some(LOAD_FAILED.to_string()),
                })
            }
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    pub fn set_category(&mut self, category: Option<ItemCategory>) {
        self.query.category = category;
    }

    pub fn set_type(&mut self, item_type: Option<ItemType>) {
        self.query.item_type = item_type;
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
    }

    /// Items passing the current query, in server order.
    pub fn visible(&self) -> Vec<&Item> {
        filter_items(&self.items, &self.query)
    }

    pub fn summary(&self) -> String {
        format!("Showing {} of {} items", self.visible().len(), self.items.len())
    }

    /// Text for an empty result list, `None` when something is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.visible().is_empty() {
            return None;
        }
        Some(if self.query.is_active() { NO_MATCHES } else { NO_ITEMS })
    }

    /// `q` value to keep in the address, `None` when the text is empty.
    pub fn query_param(&self) -> Option<&str> {
        Some(self.query.text.as_str()).filter(|t| !t.is_empty())
    }
}
