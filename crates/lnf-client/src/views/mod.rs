//! # Page View Models
//!
//! One view model per page of the Lost & Found client. Each holds the
//! single in-memory result of its last load and exposes what the page
//! renders.
//!
//! ## Pages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Route            View               Needs                            │
//! │   ─────────────    ────────────────   ───────────────────────────────  │
//! │   /                HomeView           ItemFetcher                      │
//! │   /search?q=       SearchView         ItemFetcher + ItemQuery          │
//! │   /items/{id}      ItemDetailView     ItemFetcher                      │
//! │   /my-items        MyItemsView        ItemFetcher/Mutator + AuthStore  │
//! │   /report-lost     ReportView(Lost)   ItemMutator + AuthStore          │
//! │   /report-found    ReportView(Found)  ItemMutator + AuthStore          │
//! │   /signin          account::sign_in   AuthApi + AuthStore              │
//! │   /signup          account::sign_up   AuthApi                          │
//! │   anything else    NotFound                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! A failed load leaves the view with a readable `error` and an empty
//! collection, never partial or stale data. A cancelled load returns
//! `None` and the caller drops the page. User actions return
//! `Result<_, String>` where the error is the text to show.

pub mod account;
pub mod detail;
pub mod home;
pub mod my_items;
pub mod report;
pub mod routes;
pub mod search;

pub use account::{sign_in, sign_up, RegisterOutcome};
pub use detail::ItemDetailView;
pub use home::HomeView;
pub use my_items::MyItemsView;
pub use report::{ReportStatus, ReportView};
pub use routes::Route;
pub use search::SearchView;

/// Shown when a request scope was cancelled mid-action.
pub const CANCELLED_MESSAGE: &str = "Request cancelled.";

// =============================================================================
// Test Fakes
// =============================================================================

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use lnf_core::{
        Item, ItemCategory, ItemId, ItemRequest, ItemType, ItemUpdate, UserId, UserSummary,
    };
    use tokio_util::sync::CancellationToken;

    use crate::api::{ImageUpload, ItemFetcher, ItemMutator};
    use crate::error::{ClientError, ClientResult};

    pub(crate) fn item(id: ItemId, title: &str, owner: UserId, item_type: ItemType) -> Item {
        Item {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            category: ItemCategory::Others,
            item_type,
            location: "Student Center".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            image_url: None,
            contact_info: None,
            user: Some(UserSummary {
                id: owner,
                username: format!("user{}", owner),
                email: None,
                contact_info: Some("555-0100".to_string()),
            }),
        }
    }

    /// In-memory backend. Status fields turn the matching call into an
    /// HTTP failure.
    #[derive(Default)]
    pub(crate) struct FakeBackend {
        pub items: Vec<Item>,
        pub offline: bool,
        pub update_status: Option<u16>,
        pub delete_status: Option<u16>,
        pub create_failure: Option<(u16, Option<&'static str>)>,
        pub calls: Mutex<Vec<String>>,
        pub created: Mutex<Vec<(ItemRequest, Option<String>)>>,
    }

    impl FakeBackend {
        pub(crate) fn with_items(items: Vec<Item>) -> Self {
            FakeBackend {
                items,
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn check(&self, cancel: &CancellationToken) -> ClientResult<()> {
            if cancel.is_cancelled() {
                return Err(ClientError::Cancelled);
            }
            if self.offline {
                return Err(ClientError::Network("connection refused".into()));
            }
            Ok(())
        }
    }

    fn http(status: u16, message: Option<&str>) -> ClientError {
        ClientError::Http {
            status,
            message: message.map(str::to_string),
        }
    }

    impl ItemFetcher for FakeBackend {
        async fn list_items(&self, cancel: &CancellationToken) -> ClientResult<Vec<Item>> {
            self.check(cancel)?;
            self.record("GET /api/items".into());
            Ok(self.items.clone())
        }

        async fn get_item(&self, id: ItemId, cancel: &CancellationToken) -> ClientResult<Item> {
            self.check(cancel)?;
            self.record(format!("GET /api/items/{}", id));
            self.items
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or_else(|| http(404, None))
        }

        async fn list_user_items(
            &self,
            user_id: UserId,
            cancel: &CancellationToken,
        ) -> ClientResult<Vec<Item>> {
            self.check(cancel)?;
            self.record(format!("GET /api/items/user/{}", user_id));
            Ok(self
                .items
                .iter()
                .filter(|i| i.is_owned_by(user_id))
                .cloned()
                .collect())
        }
    }

    impl ItemMutator for FakeBackend {
        async fn create_item(
            &self,
            request: &ItemRequest,
            image: Option<ImageUpload>,
            cancel: &CancellationToken,
        ) -> ClientResult<Option<Item>> {
            self.check(cancel)?;
            self.record("POST /api/items".into());
            if let Some((status, message)) = self.create_failure {
                return Err(http(status, message));
            }
            self.created
                .lock()
                .unwrap()
                .push((request.clone(), image.map(|i| i.file_name)));
            Ok(None)
        }

        async fn update_item(
            &self,
            id: ItemId,
            update: &ItemUpdate,
            token: Option<&str>,
            cancel: &CancellationToken,
        ) -> ClientResult<Item> {
            self.check(cancel)?;
            self.record(format!("PUT /api/items/{} token={:?}", id, token));
            if let Some(status) = self.update_status {
                return Err(http(status, None));
            }
            Ok(Item {
                id,
                title: update.title.clone(),
                description: update.description.clone(),
                category: update.category,
                item_type: update.item_type,
                location: update.location.clone(),
                date: update.date,
                image_url: None,
                contact_info: None,
                user: Some(UserSummary {
                    id: update.user.id,
                    username: update.user.username.clone(),
                    email: update.user.email.clone(),
                    contact_info: Some(update.user.contact_info.clone()),
                }),
            })
        }

        async fn delete_item(
            &self,
            id: ItemId,
            token: Option<&str>,
            cancel: &CancellationToken,
        ) -> ClientResult<()> {
            self.check(cancel)?;
            self.record(format!("DELETE /api/items/{} token={:?}", id, token));
            match self.delete_status {
                Some(status) => Err(http(status, None)),
                None => Ok(()),
            }
        }
    }
}
