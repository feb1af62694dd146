//! # Backend API Seams
//!
//! Traits the view models are written against. [`crate::HttpClient`]
//! implements all of them over reqwest; tests use in-memory fakes.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ItemFetcher                                                            │
//! │    list_items        GET    /api/items                                  │
//! │    get_item          GET    /api/items/{id}                             │
//! │    list_user_items   GET    /api/items/user/{userId}                    │
//! │                                                                         │
//! │  ItemMutator                                                            │
//! │    create_item       POST   /api/items        multipart request+image   │
//! │    update_item       PUT    /api/items/{id}   JSON, bearer              │
//! │    delete_item       DELETE /api/items/{id}   bearer                    │
//! │                                                                         │
//! │  AuthApi                                                                │
//! │    login             POST   /api/auth/login                             │
//! │    register          POST   /api/auth/register                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call takes the [`CancellationToken`] of its request scope and
//! yields [`ClientError::Cancelled`](crate::ClientError::Cancelled) once it
//! fires.

use std::future::Future;
use std::path::Path;

use lnf_core::{Credentials, Item, ItemId, ItemRequest, ItemUpdate, LoginResponse, Registration, UserId};
use tokio_util::sync::CancellationToken;

use crate::error::ClientResult;

/// Read side of the item endpoints.
pub trait ItemFetcher: Send + Sync {
    fn list_items(
        &self,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<Vec<Item>>> + Send;

    fn get_item(
        &self,
        id: ItemId,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<Item>> + Send;

    fn list_user_items(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<Vec<Item>>> + Send;
}

/// Write side of the item endpoints.
pub trait ItemMutator: Send + Sync {
    /// Creates an item. Returns the stored record when the server echoes it.
    fn create_item(
        &self,
        request: &ItemRequest,
        image: Option<ImageUpload>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<Option<Item>>> + Send;

    fn update_item(
        &self,
        id: ItemId,
        update: &ItemUpdate,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<Item>> + Send;

    fn delete_item(
        &self,
        id: ItemId,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<()>> + Send;
}

/// Account endpoints.
pub trait AuthApi: Send + Sync {
    /// Posts the credentials. The reply is returned unvalidated; the status
    /// travels with it so the caller can apply the login schema.
    fn login(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<LoginReply>> + Send;

    /// Posts a sign-up. Returns the server's message whatever the status,
    /// as long as the body is JSON.
    fn register(
        &self,
        registration: &Registration,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ClientResult<Option<String>>> + Send;
}

/// Raw reply of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    pub status_ok: bool,
    pub body: LoginResponse,
}

// =============================================================================
// Image Upload
// =============================================================================

/// Optional image part of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        ImageUpload {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Reads an image from disk.
    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
