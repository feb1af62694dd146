//! # HTTP Client
//!
//! reqwest implementation of [`ItemFetcher`], [`ItemMutator`] and
//! [`AuthApi`].
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   view ──► HttpClient::send ──┬── cancel.cancelled() ──► Cancelled      │
//! │                               │                                         │
//! │                               └── request.send()                        │
//! │                                     │                                   │
//! │                       ┌─────────────┼──────────────┐                    │
//! │                       ▼             ▼              ▼                    │
//! │                  no reply       non-2xx          2xx                    │
//! │                  Network/      Http{status,     JSON body               │
//! │                  Timeout       message}         └─► Decode on mismatch  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One request per call. Nothing is retried or cached.

use std::time::Instant;

use lnf_core::{
    Credentials, Item, ItemId, ItemRequest, ItemUpdate, LoginResponse, MessageResponse,
    Registration, UserId,
};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::api::{AuthApi, ImageUpload, ItemFetcher, ItemMutator, LoginReply};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// REST client bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Builds a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(HttpClient {
            http,
            base_url: config.base_url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint under the base URL. `path` is joined relative to it, so a
    /// base path prefix is kept.
    fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    /// Sends a request, racing it against the cancellation token.
    async fn send(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> ClientResult<Response> {
        let started = Instant::now();
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = request.send() => result?,
        };

        debug!(
            url = %response.url(),
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
        Ok(response)
    }

    /// Reads the reply body, still honouring cancellation.
    async fn read_body(
        response: Response,
        cancel: &CancellationToken,
    ) -> ClientResult<(StatusCode, Vec<u8>)> {
        let status = response.status();
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            body = response.bytes() => body?,
        };
        Ok((status, body.to_vec()))
    }

    /// Sends a request and decodes a 2xx JSON reply.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> ClientResult<T> {
        let response = self.send(request, cancel).await?;
        let (status, body) = Self::read_body(response, cancel).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Builds an [`ClientError::Http`] from a failed reply, keeping the
/// server's `message` (JSON) or plain-text body.
fn http_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<MessageResponse>(body)
        .ok()
        .and_then(|m| m.message)
        .or_else(|| {
            std::str::from_utf8(body)
                .ok()
                .map(str::trim)
                .filter(|text| !text.is_empty() && !text.starts_with('{'))
                .map(str::to_string)
        });

    warn!(status = status.as_u16(), message = ?message, "Backend rejected request");
    ClientError::Http {
        status: status.as_u16(),
        message,
    }
}

// =============================================================================
// ItemFetcher
// =============================================================================

impl ItemFetcher for HttpClient {
    async fn list_items(&self, cancel: &CancellationToken) -> ClientResult<Vec<Item>> {
        let url = self.url("/api/items")?;
        let items: Vec<Item> = self.fetch_json(self.http.get(url), cancel).await?;
        debug!(count = items.len(), "Fetched items");
        Ok(items)
    }

    async fn get_item(&self, id: ItemId, cancel: &CancellationToken) -> ClientResult<Item> {
        let url = self.url(&format!("/api/items/{}", id))?;
        self.fetch_json(self.http.get(url), cancel).await
    }

    async fn list_user_items(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<Item>> {
        let url = self.url(&format!("/api/items/user/{}", user_id))?;
        let items: Vec<Item> = self.fetch_json(self.http.get(url), cancel).await?;
        debug!(user_id, count = items.len(), "Fetched user items");
        Ok(items)
    }
}

// =============================================================================
// ItemMutator
// =============================================================================

impl ItemMutator for HttpClient {
    async fn create_item(
        &self,
        request: &ItemRequest,
        image: Option<ImageUpload>,
        cancel: &CancellationToken,
    ) -> ClientResult<Option<Item>> {
        let url = self.url("/api/items")?;
        let metadata = serde_json::to_vec(request)?;

        let mut form = Form::new().part(
            "request",
            Part::bytes(metadata)
                .file_name("request.json")
                .mime_str("application/json")?,
        );
        if let Some(image) = image {
            debug!(file = %image.file_name, size = image.bytes.len(), "Attaching image");
            form = form.part(
                "imageFile",
                Part::bytes(image.bytes)
                    .file_name(image.file_name)
                    .mime_str(&image.content_type)?,
            );
        }

        let response = self.send(self.http.post(url).multipart(form), cancel).await?;
        let (status, body) = Self::read_body(response, cancel).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }

        match serde_json::from_slice::<Item>(&body) {
            Ok(item) => {
                debug!(id = item.id, "Item created");
                Ok(Some(item))
            }
            Err(e) => {
                debug!(error = %e, "Create reply carried no item");
                Ok(None)
            }
        }
    }

    async fn update_item(
        &self,
        id: ItemId,
        update: &ItemUpdate,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> ClientResult<Item> {
        let url = self.url(&format!("/api/items/{}", id))?;
        let request = Self::with_bearer(self.http.put(url).json(update), token);
        let item: Item = self.fetch_json(request, cancel).await?;
        debug!(id = item.id, "Item updated");
        Ok(item)
    }

    async fn delete_item(
        &self,
        id: ItemId,
        token: Option<&str>,
        cancel: &CancellationToken,
    ) -> ClientResult<()> {
        let url = self.url(&format!("/api/items/{}", id))?;
        let request = Self::with_bearer(self.http.delete(url), token);
        let response = self.send(request, cancel).await?;
        let (status, body) = Self::read_body(response, cancel).await?;
        if !status.is_success() {
            return Err(http_error(status, &body));
        }
        debug!(id, "Item deleted");
        Ok(())
    }
}

// =============================================================================
// AuthApi
// =============================================================================

impl AuthApi for HttpClient {
    async fn login(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> ClientResult<LoginReply> {
        let url = self.url("/api/auth/login")?;
        let response = self.send(self.http.post(url).json(credentials), cancel).await?;
        let (status, body) = Self::read_body(response, cancel).await?;

        match serde_json::from_slice::<LoginResponse>(&body) {
            Ok(body) => Ok(LoginReply {
                status_ok: status.is_success(),
                body,
            }),
            Err(_) if !status.is_success() => Err(http_error(status, &body)),
            Err(e) => Err(e.into()),
        }
    }

    async fn register(
        &self,
        registration: &Registration,
        cancel: &CancellationToken,
    ) -> ClientResult<Option<String>> {
        let url = self.url("/api/auth/register")?;
        let response = self.send(self.http.post(url).json(registration), cancel).await?;
        let (status, body) = Self::read_body(response, cancel).await?;

        match serde_json::from_slice::<MessageResponse>(&body) {
            Ok(reply) => {
                debug!(status = status.as_u16(), message = ?reply.message, "Registration reply");
                Ok(reply.message)
            }
            Err(_) if !status.is_success() => Err(http_error(status, &body)),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests (against an in-process stub backend)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, Path};
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use lnf_core::{ItemCategory, ItemType, SessionProfile};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn item_json(id: i64, owner: i64) -> Value {
        json!({
            "id": id,
            "title": format!("Item {}", id),
            "description": "Blue backpack",
            "category": "ACCESSORIES",
            "type": "FOUND",
            "location": "Gym",
            "date": "2024-04-02",
            "imageUrl": null,
            "user": {"id": owner, "username": "sam", "email": "sam@campus.edu", "contactInfo": "555-0100"}
        })
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer tok")
    }

    async fn get_item(Path(id): Path<i64>) -> axum::response::Response {
        match id {
            404 => (
                axum::http::StatusCode::NOT_FOUND,
                Json(json!({"message": "Item not found"})),
            )
                .into_response(),
            999 => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(item_json(id, 1)).into_response()
            }
            _ => Json(item_json(id, 1)).into_response(),
        }
    }

    async fn user_items(Path(user_id): Path<i64>) -> axum::response::Response {
        if user_id == 99 {
            return "<html>oops</html>".into_response();
        }
        Json(json!([item_json(10, user_id), item_json(11, user_id)])).into_response()
    }

    async fn update_item(
        Path(id): Path<i64>,
        headers: HeaderMap,
        Json(mut body): Json<Value>,
    ) -> axum::response::Response {
        if !authorized(&headers) {
            return (
                axum::http::StatusCode::FORBIDDEN,
                Json(json!({"message": "You can only edit your own items"})),
            )
                .into_response();
        }
        if id == 404 {
            return axum::http::StatusCode::NOT_FOUND.into_response();
        }
        body["id"] = json!(id);
        Json(body).into_response()
    }

    async fn delete_item(Path(_id): Path<i64>, headers: HeaderMap) -> axum::http::StatusCode {
        if authorized(&headers) {
            axum::http::StatusCode::NO_CONTENT
        } else {
            axum::http::StatusCode::FORBIDDEN
        }
    }

    async fn create_item(mut multipart: Multipart) -> axum::response::Response {
        let mut request: Option<Value> = None;
        let mut image_name: Option<String> = None;
        while let Some(field) = multipart.next_field().await.unwrap() {
            match field.name() {
                Some("request") => {
                    assert_eq!(field.content_type(), Some("application/json"));
                    let bytes = field.bytes().await.unwrap();
                    request = Some(serde_json::from_slice(&bytes).unwrap());
                }
                Some("imageFile") => {
                    image_name = field.file_name().map(str::to_string);
                    let _ = field.bytes().await.unwrap();
                }
                _ => {}
            }
        }

        let Some(mut item) = request else {
            return axum::http::StatusCode::BAD_REQUEST.into_response();
        };
        item["id"] = json!(42);
        item["imageUrl"] = json!(image_name.map(|n| format!("/uploads/{}", n)));
        (axum::http::StatusCode::CREATED, Json(item)).into_response()
    }

    async fn login(Json(body): Json<Value>) -> axum::response::Response {
        if body["username"] == "sam" && body["password"] == "pw" {
            Json(json!({
                "message": "Login successful!",
                "user": {"id": 4, "username": "sam", "email": "sam@campus.edu"}
            }))
            .into_response()
        } else {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid credentials"})),
            )
                .into_response()
        }
    }

    async fn register(Json(body): Json<Value>) -> axum::response::Response {
        if body["username"] == "taken" {
            (
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"message": "Username already exists!"})),
            )
                .into_response()
        } else {
            Json(json!({"message": "User registered successfully!"})).into_response()
        }
    }

    fn stub_backend() -> Router {
        Router::new()
            .route("/api/items", get(|| async { Json(json!([item_json(1, 1), item_json(2, 3)])) }).post(create_item))
            .route("/api/items/{id}", get(get_item).put(update_item).delete(delete_item))
            .route("/api/items/user/{user_id}", get(user_items))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
    }

    async fn spawn_stub() -> HttpClient {
        spawn_stub_at(stub_backend(), "").await
    }

    /// Serves `app` and points a client at `http://addr{prefix}`.
    async fn spawn_stub_at(app: Router, prefix: &str) -> HttpClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = ClientConfig::default();
        config.api.base_url = format!("http://{}{}", addr, prefix);
        config.api.timeout_secs = 10;
        HttpClient::new(&config).unwrap()
    }

    fn profile() -> SessionProfile {
        SessionProfile {
            id: 4,
            username: "sam".into(),
            email: Some("sam@campus.edu".into()),
        }
    }

    fn fields() -> lnf_core::validation::ItemFields {
        lnf_core::validation::ItemFields {
            title: "Umbrella".into(),
            description: "Black, folding".into(),
            category: ItemCategory::Others,
            location: "Lecture Hall 2".into(),
            date: NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(),
            item_type: ItemType::Lost,
            contact_info: "555-0199".into(),
        }
    }

    #[tokio::test]
    async fn test_list_and_get_items() {
        let client = spawn_stub().await;
        let cancel = CancellationToken::new();

        let items = client.list_items(&cancel).await.unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);

        let item = client.get_item(7, &cancel).await.unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.item_type, ItemType::Found);

        let mine = client.list_user_items(4, &cancel).await.unwrap();
        assert!(mine.iter().all(|i| i.is_owned_by(4)));
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let mut config = ClientConfig::default();
        config.api.base_url = "https://campus.example.edu/lnf".into();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(
            client.url("/api/items").unwrap().as_str(),
            "https://campus.example.edu/lnf/api/items"
        );
        assert_eq!(
            client.url("/api/items/user/4").unwrap().as_str(),
            "https://campus.example.edu/lnf/api/items/user/4"
        );
    }

    #[tokio::test]
    async fn test_prefixed_backend_is_reached() {
        let app = Router::new().nest("/lnf", stub_backend());
        let client = spawn_stub_at(app, "/lnf").await;

        let items = client.list_items(&CancellationToken::new()).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_keeps_server_message() {
        let client = spawn_stub().await;
        let err = client.get_item(404, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_message(), Some("Item not found"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = spawn_stub().await;
        let err = client
            .list_user_items(99, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_cancellation_aborts_in_flight_request() {
        let client = spawn_stub().await;
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = client.get_item(999, &cancel).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = ClientConfig::default();
        config.api.base_url = format!("http://{}", addr);
        let client = HttpClient::new(&config).unwrap();

        let err = client.list_items(&CancellationToken::new()).await.unwrap_err();
        assert!(err.is_network_error(), "unexpected: {:?}", err);
    }

    #[tokio::test]
    async fn test_create_sends_multipart_parts() {
        let client = spawn_stub().await;
        let request = ItemRequest::new(fields(), &profile());
        let image = ImageUpload::new("umbrella.png", vec![0x89, 0x50]);

        let created = client
            .create_item(&request, Some(image), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, 42);
        assert_eq!(created.title, "Umbrella");
        assert_eq!(created.image_url.as_deref(), Some("/uploads/umbrella.png"));
        assert_eq!(created.contact(), Some("555-0199"));
    }

    #[tokio::test]
    async fn test_update_requires_bearer() {
        let client = spawn_stub().await;
        let cancel = CancellationToken::new();
        let update = ItemUpdate::new(fields(), &profile());

        let updated = client.update_item(5, &update, Some("tok"), &cancel).await.unwrap();
        assert_eq!(updated.id, 5);
        assert_eq!(updated.location, "Lecture Hall 2");

        let err = client.update_item(5, &update, None, &cancel).await.unwrap_err();
        assert!(err.is_forbidden());

        let err = client.update_item(404, &update, Some("tok"), &cancel).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_status_mapping() {
        let client = spawn_stub().await;
        let cancel = CancellationToken::new();
        client.delete_item(3, Some("tok"), &cancel).await.unwrap();
        let err = client.delete_item(3, Some("wrong"), &cancel).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_login_reply_carries_status() {
        let client = spawn_stub().await;
        let cancel = CancellationToken::new();

        let ok = client
            .login(&Credentials { username: "sam".into(), password: "pw".into() }, &cancel)
            .await
            .unwrap();
        assert!(ok.status_ok);
        assert!(ok.body.is_success_message());

        let denied = client
            .login(&Credentials { username: "sam".into(), password: "nope".into() }, &cancel)
            .await
            .unwrap();
        assert!(!denied.status_ok);
        assert_eq!(denied.body.message.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_register_returns_message_for_any_status() {
        let client = spawn_stub().await;
        let cancel = CancellationToken::new();
        let registration = |username: &str| Registration {
            username: username.into(),
            email: "x@campus.edu".into(),
            password: "pw".into(),
        };

        let accepted = client.register(&registration("new"), &cancel).await.unwrap();
        assert_eq!(accepted.as_deref(), Some("User registered successfully!"));

        let taken = client.register(&registration("taken"), &cancel).await.unwrap();
        assert_eq!(taken.as_deref(), Some("Username already exists!"));
    }

    #[test]
    fn test_http_error_reads_plain_text() {
        let err = http_error(StatusCode::FORBIDDEN, b"Forbidden");
        assert_eq!(err.server_message(), Some("Forbidden"));
        let err = http_error(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(err.server_message(), None);
    }
}
