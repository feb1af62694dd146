//! # Domain Types
//!
//! Core domain types exchanged with the Lost & Found backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │  ItemCategory   │   │    ItemType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  ELECTRONICS    │   │  LOST           │       │
//! │  │  title          │   │  ACCESSORIES    │   │  FOUND          │       │
//! │  │  category/type  │   │  CLOTHING ...   │   └─────────────────┘       │
//! │  │  date, user     │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemDraft     │──►│  ItemRequest    │   │   ItemUpdate    │       │
//! │  │  (form state)   │   │  (POST part)    │   │  (PUT body)     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are owned by the server. The client keeps them by value and never
//! invents ids, categories or types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::validation::ItemFields;
use crate::{SessionProfile, PLACEHOLDER_IMAGE};

/// Server-assigned item identifier.
pub type ItemId = i64;

/// Server-assigned account identifier.
pub type UserId = i64;

// =============================================================================
// Item Category
// =============================================================================

/// Fixed taxonomy tag for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Electronics,
    Accessories,
    Clothing,
    Books,
    Keys,
    Documents,
    /// Serialized as `OTHERS`; the backend schema also spells it `OTHER`.
    #[serde(alias = "OTHER")]
    Others,
}

impl ItemCategory {
    /// Every category, in the order the selectors list them.
    pub const ALL: [ItemCategory; 7] = [
        ItemCategory::Electronics,
        ItemCategory::Documents,
        ItemCategory::Accessories,
        ItemCategory::Clothing,
        ItemCategory::Keys,
        ItemCategory::Books,
        ItemCategory::Others,
    ];

    /// Wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Electronics => "ELECTRONICS",
            ItemCategory::Accessories => "ACCESSORIES",
            ItemCategory::Clothing => "CLOTHING",
            ItemCategory::Books => "BOOKS",
            ItemCategory::Keys => "KEYS",
            ItemCategory::Documents => "DOCUMENTS",
            ItemCategory::Others => "OTHERS",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ELECTRONICS" => Ok(ItemCategory::Electronics),
            "ACCESSORIES" => Ok(ItemCategory::Accessories),
            "CLOTHING" => Ok(ItemCategory::Clothing),
            "BOOKS" => Ok(ItemCategory::Books),
            "KEYS" => Ok(ItemCategory::Keys),
            "DOCUMENTS" => Ok(ItemCategory::Documents),
            "OTHERS" | "OTHER" => Ok(ItemCategory::Others),
            _ => Err(CoreError::UnknownCategory(s.to_string())),
        }
    }
}

// =============================================================================
// Item Type
// =============================================================================

/// Whether an item was lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    /// Wire name of the type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "LOST",
            ItemType::Found => "FOUND",
        }
    }

    /// Lower-case noun used in report messages ("lost item").
    pub const fn noun(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOST" => Ok(ItemType::Lost),
            "FOUND" => Ok(ItemType::Found),
            _ => Err(CoreError::UnknownItemType(s.to_string())),
        }
    }
}

// =============================================================================
// User Summary
// =============================================================================

/// Owning account summary embedded in an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
}

// =============================================================================
// Item
// =============================================================================

/// A lost/found listing as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-assigned, immutable.
    pub id: ItemId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    pub category: ItemCategory,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,

    pub date: NaiveDate,

    /// Absent means the placeholder image.
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub contact_info: Option<String>,

    #[serde(default)]
    pub user: Option<UserSummary>,
}

impl Item {
    /// Image to display, falling back to the placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Contact details for the item, preferring the item's own field.
    pub fn contact(&self) -> Option<&str> {
        self.contact_info
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                self.user
                    .as_ref()
                    .and_then(|u| u.contact_info.as_deref())
                    .filter(|c| !c.trim().is_empty())
            })
    }

    /// Returns true if the given account owns this item.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == user_id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Item Draft (form state)
// =============================================================================

/// Unvalidated form state for reporting or editing an item.
///
/// Category and type stay optional until the user picks one; the date is
/// kept as typed and parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub category: Option<ItemCategory>,
    pub location: String,
    pub date: String,
    pub item_type: Option<ItemType>,
    pub contact_info: String,
}

impl ItemDraft {
    /// Empty report form with the type preset by the page.
    pub fn for_type(item_type: ItemType) -> Self {
        ItemDraft {
            item_type: Some(item_type),
            ..Default::default()
        }
    }

    /// Edit form seeded from an existing item.
    pub fn from_item(item: &Item) -> Self {
        ItemDraft {
            title: item.title.clone(),
            description: item.description.clone(),
            category: Some(item.category),
            location: item.location.clone(),
            date: item.date.format("%Y-%m-%d").to_string(),
            item_type: Some(item.item_type),
            contact_info: item.contact().unwrap_or_default().to_string(),
        }
    }
}

// =============================================================================
// Request Payloads
// =============================================================================

/// Owner block sent with create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub contact_info: String,
}

impl OwnerRef {
    fn new(profile: &SessionProfile, contact_info: &str) -> Self {
        OwnerRef {
            id: profile.id,
            username: profile.username.clone(),
            email: profile.email.clone(),
            contact_info: contact_info.to_string(),
        }
    }
}

/// JSON metadata part of the multipart create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub location: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub contact_info: String,
    pub user: OwnerRef,
}

impl ItemRequest {
    pub fn new(fields: ItemFields, owner: &SessionProfile) -> Self {
        let user = OwnerRef::new(owner, &fields.contact_info);
        ItemRequest {
            title: fields.title,
            description: fields.description,
            category: fields.category,
            location: fields.location,
            date: fields.date,
            item_type: fields.item_type,
            contact_info: fields.contact_info,
            user,
        }
    }
}

/// Full replacement of the mutable fields, sent as the PUT body.
///
/// Contact info travels inside the owner block only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub title: String,
    pub category: ItemCategory,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub user: OwnerRef,
}

impl ItemUpdate {
    pub fn new(fields: ItemFields, owner: &SessionProfile) -> Self {
        let user = OwnerRef::new(owner, &fields.contact_info);
        ItemUpdate {
            title: fields.title,
            category: fields.category,
            description: fields.description,
            location: fields.location,
            date: fields.date,
            item_type: fields.item_type,
            user,
        }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Plain `{ "message": ... }` reply used by the auth and error endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
