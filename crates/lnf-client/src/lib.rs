//! # lnf-client: REST Client and View Models for Lost & Found
//!
//! Talks to the Lost & Found backend, keeps the signed-in session on disk
//! and exposes one view model per page.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ClientConfig ──► HttpClient ──────────────┐                           │
//! │   (TOML + env)     (reqwest, base URL)      │                           │
//! │                                             ▼                           │
//! │   FileStorage ───► AuthStore ───────► views::* ──► rendered page        │
//! │   (user, token)    (Session)          (load, filter, mutate)            │
//! │                                             ▲                           │
//! │                                             │                           │
//! │                      CancellationToken ─────┘  one per request scope    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Base URL, timeout and session path
//! - [`storage`] - Persisted `user` / `token` keys
//! - [`api`] - `ItemFetcher`, `ItemMutator` and `AuthApi` seams
//! - [`http`] - reqwest implementation of the seams
//! - [`auth`] - `AuthStore` session transitions
//! - [`views`] - Page view models and routes
//! - [`error`] - Client error types

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod storage;
pub mod views;

pub use api::{AuthApi, ImageUpload, ItemFetcher, ItemMutator, LoginReply};
pub use auth::AuthStore;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

pub use tokio_util::sync::CancellationToken;
