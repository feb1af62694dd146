//! Home page: counts, the recent strip and the search box.

use lnf_core::filter::{count_by_type, recent};
use lnf_core::{Item, ItemType, RECENT_ITEMS_LIMIT};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::api::ItemFetcher;
use crate::error::ClientError;
use crate::views::Route;

pub const LOAD_FAILED: &str = "Failed to load items. Please try again later.";

#[derive(Debug, Clone, Default)]
pub struct HomeView {
    pub items: Vec<Item>,
    pub error: Option<String>,
}

impl HomeView {
    /// Loads every item. `None` if the request scope was cancelled.
    pub async fn load<F: ItemFetcher>(api: &F, cancel: &CancellationToken) -> Option<Self> {
        match api.list_items(cancel).await {
            Ok(items) => Some(HomeView { items, error: None }),
            Err(ClientError::Cancelled) => None,
            Err(e) => {
                warn!(error = %e, "Home page load failed");
                Some(HomeView {
                    items: Vec::new(),
                    error: Some(LOAD_FAILED.to_string()),
                })
            }
        }
    }

    pub fn found_count(&self) -> usize {
        count_by_type(&self.items, ItemType::Found)
    }

    pub fn lost_count(&self) -> usize {
        count_by_type(&self.items, ItemType::Lost)
    }

    /// First items in server order.
    pub fn recent(&self) -> &[Item] {
        recent(&self.items, RECENT_ITEMS_LIMIT)
    }

    /// Where the search box leads. Blank input stays on the page.
    pub fn search_target(query: &str) -> Option<Route> {
        let query = query.trim();
        (!query.is_empty()).then(|| Route::Search {
            query: Some(query.to_string()),
        })
    }
}
