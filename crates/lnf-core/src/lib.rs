//! # lnf-core: Pure Domain Logic for the Lost & Found Client
//!
//! This crate holds the domain model and every rule that can be expressed
//! without touching the network or the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lost & Found Client Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`lnf`)                             │   │
//! │  │    home ──► search ──► item ──► mine ──► report ──► signin      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    lnf-client                                   │   │
//! │  │    AuthStore, ItemFetcher, ItemMutator, page view models        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lnf-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │  session  │  │ validation│  │   │
//! │  │   │   Item    │  │ ItemQuery │  │  Session  │  │  forms    │  │   │
//! │  │   │ Category  │  │ TypeFilter│  │ LoginResp │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item, category, type and the request payloads
//! - [`filter`] - Search/category/type narrowing of item collections
//! - [`session`] - Signed-in session and the login response schema
//! - [`validation`] - Client-side form checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lnf_core::filter::{filter_items, ItemQuery};
//! use lnf_core::ItemType;
//!
//! let query = ItemQuery::new().with_type(ItemType::Found);
//! let visible = filter_items(&[], &query);
//! assert!(visible.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{filter_items, ItemQuery, TypeFilter};
pub use session::{LoginResponse, Session, SessionProfile};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Message the backend returns for a successful login.
///
/// Anything else, including a 2xx response with a different message,
/// is treated as a failed login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";

/// Message the backend returns when an account was created.
pub const REGISTER_SUCCESS_MESSAGE: &str = "User registered successfully!";

/// Image shown for items without an `imageUrl`.
pub const PLACEHOLDER_IMAGE: &str = "/LNF_image.jpg";

/// Number of items shown in the "recent" strip of the home page.
pub const RECENT_ITEMS_LIMIT: usize = 10;
