//! # Item Filtering
//!
//! Pure narrowing of an item collection, shared by the search, home and
//! my-items pages.
//!
//! ## Predicate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  item passes  ⇔  (text empty  ∨ text ⊂ title ∨ description ∨ location) │
//! │               ∧  (category unset ∨ item.category == category)           │
//! │               ∧  (type unset     ∨ item.type     == type)               │
//! │                                                                         │
//! │  • text match is case-insensitive                                      │
//! │  • input order is preserved (stable, no re-sort)                       │
//! │  • an empty query is the identity                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Item, ItemCategory, ItemType};

// =============================================================================
// Item Query
// =============================================================================

/// Free-text and categorical predicates for [`filter_items`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    /// Substring searched in title, description and location.
    pub text: String,
    pub category: Option<ItemCategory>,
    pub item_type: Option<ItemType>,
}

impl ItemQuery {
    /// Query that passes every item.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    /// Returns true if any predicate is set.
    ///
    /// Drives the "no match" versus "no items" empty-state text.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty() || self.category.is_some() || self.item_type.is_some()
    }

    /// Resets every predicate.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Evaluates the predicate for one item.
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_text(item)
            && self.category.map_or(true, |c| item.category == c)
            && self.item_type.map_or(true, |t| item.item_type == t)
    }

    fn matches_text(&self, item: &Item) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = self.text.to_lowercase();
        [&item.title, &item.description, &item.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Returns the items matching `query`, in input order.
pub fn filter_items<'a>(items: &'a [Item], query: &ItemQuery) -> Vec<&'a Item> {
    items.iter().filter(|item| query.matches(item)).collect()
}

// =============================================================================
// Type Filter (my-items tabs)
// =============================================================================

/// ALL / LOST / FOUND selector of the my-items page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFilter {
    #[default]
    All,
    Lost,
    Found,
}

impl TypeFilter {
    /// The type constraint this tab applies, if any.
    pub fn as_item_type(&self) -> Option<ItemType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Lost => Some(ItemType::Lost),
            TypeFilter::Found => Some(ItemType::Found),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.as_item_type().map_or(true, |t| item.item_type == t)
    }
}

impl From<Option<ItemType>> for TypeFilter {
    fn from(value: Option<ItemType>) -> Self {
        match value {
            None => TypeFilter::All,
            Some(ItemType::Lost) => TypeFilter::Lost,
            Some(ItemType::Found) => TypeFilter::Found,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.pad("ALL"),
            TypeFilter::Lost => f.pad("LOST"),
            TypeFilter::Found => f.pad("FOUND"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        Ok(TypeFilter::from(Some(s.parse::<ItemType>()?)))
    }
}

// =============================================================================
// Collection Summaries
// =============================================================================

/// Number of items of the given type.
pub fn count_by_type(items: &[Item], item_type: ItemType) -> usize {
    items.iter().filter(|i| i.item_type == item_type).count()
}

/// First `limit` items as returned by the server.
pub fn recent(items: &[Item], limit: usize) -> &[Item] {
    &items[..items.len().min(limit)]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: i64, title: &str, location: &str, category: ItemCategory, t: ItemType) -> Item {
        Item {
            id,
            title: title.to_string(),
            description: format!("description of {}", title),
            category,
            item_type: t,
            location: location.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            image_url: None,
            contact_info: None,
            user: None,
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            item(1, "Black Wallet", "Central Library", ItemCategory::Accessories, ItemType::Lost),
            item(2, "iPhone 13", "Cafeteria", ItemCategory::Electronics, ItemType::Found),
            item(3, "Car Keys", "Parking Lot B", ItemCategory::Keys, ItemType::Lost),
            item(4, "Calculus Textbook", "Library Annex", ItemCategory::Books, ItemType::Found),
        ]
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let items = sample();
        let out = filter_items(&items, &ItemQuery::new());
        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
        assert!(!ItemQuery::new().is_active());
    }

    #[test]
    fn test_type_filter_excludes_other_type() {
        let items = sample();
        let found = filter_items(&items, &ItemQuery::new().with_type(ItemType::Found));
        assert!(found.iter().all(|i| i.item_type == ItemType::Found));
        assert_eq!(ids(&found), vec![2, 4]);

        let lost = filter_items(&items, &ItemQuery::new().with_type(ItemType::Lost));
        assert!(lost.iter().all(|i| i.item_type == ItemType::Lost));
    }

    #[test]
    fn test_location_only_match_is_case_insensitive() {
        let items = sample();
        let out = filter_items(&items, &ItemQuery::new().with_text("PARKING"));
        assert_eq!(ids(&out), vec![3]);
    }

    #[test]
    fn test_text_searches_title_and_description() {
        let items = sample();
        assert_eq!(ids(&filter_items(&items, &ItemQuery::new().with_text("iphone"))), vec![2]);
        assert_eq!(
            ids(&filter_items(&items, &ItemQuery::new().with_text("description of car"))),
            vec![3]
        );
    }

    #[test]
    fn test_predicates_combine_and_preserve_order() {
        let items = sample();
        let query = ItemQuery::new()
            .with_text("library")
            .with_type(ItemType::Found)
            .with_category(ItemCategory::Books);
        assert_eq!(ids(&filter_items(&items, &query)), vec![4]);

        let query = ItemQuery::new().with_text("library");
        assert_eq!(ids(&filter_items(&items, &query)), vec![1, 4]);
    }

    #[test]
    fn test_clear_resets_query() {
        let mut query = ItemQuery::new().with_text("x").with_type(ItemType::Lost);
        assert!(query.is_active());
        query.clear();
        assert_eq!(query, ItemQuery::new());
    }

    #[test]
    fn test_type_filter_tabs() {
        let items = sample();
        assert_eq!(items.iter().filter(|i| TypeFilter::All.matches(i)).count(), 4);
        assert_eq!(items.iter().filter(|i| TypeFilter::Lost.matches(i)).count(), 2);
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!("found".parse::<TypeFilter>().unwrap(), TypeFilter::Found);
        assert!("both".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_counts_and_recent() {
        let items = sample();
        assert_eq!(count_by_type(&items, ItemType::Lost), 2);
        assert_eq!(count_by_type(&items, ItemType::Found), 2);
        assert_eq!(recent(&items, 3).len(), 3);
        assert_eq!(recent(&items, 10).len(), 4);
        assert!(recent(&[], 10).is_empty());
    }
}
