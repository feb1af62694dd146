//! Text rendering of items and pages.

use std::fmt::Write as _;

use lnf_core::Item;

/// One-line listing entry.
pub fn item_line(item: &Item) -> String {
    format!(
        "#{:<5} {:<5} {:<11} {}  ({}, {})",
        item.id,
        item.item_type,
        item.category,
        item.title,
        item.location,
        item.date.format("%Y-%m-%d"),
    )
}

/// Full detail card.
pub fn item_card(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", item.title);
    let _ = writeln!(out, "{}", "=".repeat(item.title.chars().count().max(1)));
    let _ = writeln!(out, "Type:        {}", item.item_type);
    let _ = writeln!(out, "Category:    {}", item.category);
    let _ = writeln!(out, "Location:    {}", item.location);
    let _ = writeln!(out, "Date:        {}", item.date.format("%B %-d, %Y"));
    if let Some(user) = &item.user {
        if !user.username.is_empty() {
            let _ = writeln!(out, "Reported by: {}", user.username);
        }
    }
    let _ = writeln!(out, "Contact:     {}", item.contact().unwrap_or("-"));
    let _ = writeln!(out, "Image:       {}", item.image_or_placeholder());
    let _ = writeln!(out);
    let _ = write!(out, "{}", item.description);
    out
}

pub fn item_list<'a>(items: impl IntoIterator<Item = &'a Item>) -> String {
    items
        .into_iter()
        .map(item_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnf_core::{ItemCategory, ItemType, PLACEHOLDER_IMAGE};

    fn sample() -> Item {
        serde_json::from_str(
            r#"{"id":7,"title":"Black Wallet","description":"Leather","category":"ACCESSORIES",
                "type":"LOST","location":"Library","date":"2024-03-08",
                "user":{"id":1,"username":"sam","contactInfo":"555-0100"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_item_line() {
        let line = item_line(&sample());
        assert!(line.starts_with("#7"));
        assert!(line.contains("LOST"));
        assert!(line.contains("Black Wallet"));
        assert!(line.ends_with("(Library, 2024-03-08)"));
    }

    #[test]
    fn test_item_card_uses_fallbacks() {
        let card = item_card(&sample());
        assert!(card.contains("Date:        March 8, 2024"));
        assert!(card.contains("Contact:     555-0100"));
        assert!(card.contains(PLACEHOLDER_IMAGE));
        assert!(card.contains("Reported by: sam"));
    }

    #[test]
    fn test_item_list_joins_lines() {
        let mut other = sample();
        other.id = 8;
        other.item_type = ItemType::Found;
        other.category = ItemCategory::Keys;
        let text = item_list([&sample(), &other]);
        assert_eq!(text.lines().count(), 2);
    }
}
