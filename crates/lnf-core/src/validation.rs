//! # Validation Module
//!
//! Client-side checks run before anything is submitted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Required report fields present                                    │
//! │  ├── Date parses as YYYY-MM-DD                                         │
//! │  └── Sign-up password confirmation matches                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend                                                      │
//! │  ├── Ownership checks (403)                                            │
//! │  ├── Duplicate username / email                                        │
//! │  └── Credential verification                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{Credentials, ItemCategory, ItemDraft, ItemType, Registration};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub location: String,
    pub date: NaiveDate,
    pub item_type: ItemType,
    pub contact_info: String,
}

/// Validates a report or edit form.
///
/// ## Rules
/// - title, description, category, location, date, type and contact info
///   are all required
/// - the date must be a calendar date (`YYYY-MM-DD`)
///
/// Every missing field is listed in the error, but the message shown to
/// the user is the single "Please fill in all required fields."
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<ItemFields> {
    let mut missing = Vec::new();
    let mut require = |name: &str, value: &str| {
        if value.trim().is_empty() {
            missing.push(name.to_string());
        }
    };

    require("title", &draft.title);
    require("description", &draft.description);
    require("location", &draft.location);
    require("date", &draft.date);
    require("contactInfo", &draft.contact_info);
    if draft.category.is_none() {
        missing.push("category".to_string());
    }
    if draft.item_type.is_none() {
        missing.push("type".to_string());
    }

    let (Some(category), Some(item_type)) = (draft.category, draft.item_type) else {
        return Err(ValidationError::MissingFields { fields: missing });
    };
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    let date = parse_date(&draft.date)?;

    Ok(ItemFields {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        category,
        location: draft.location.trim().to_string(),
        date,
        item_type,
        contact_info: draft.contact_info.trim().to_string(),
    })
}

/// Parses a form date.
pub fn parse_date(value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: e.to_string(),
        }
    })
}

/// Validates the sign-in form.
pub fn validate_credentials(username: &str, password: &str) -> ValidationResult<Credentials> {
    if username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(Credentials {
        username: username.trim().to_string(),
        password: password.to_string(),
    })
}

/// Validates the sign-up form.
///
/// The password confirmation is checked first, matching the form's
/// submit order.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<Registration> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    for (field, value) in [("username", username), ("email", email), ("password", password)] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    Ok(Registration {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ItemDraft {
        ItemDraft {
            title: "Black Wallet".into(),
            description: "Leather".into(),
            category: Some(ItemCategory::Accessories),
            location: "Library".into(),
            date: "2024-03-18".into(),
            item_type: Some(ItemType::Lost),
            contact_info: "0771234567".into(),
        }
    }

    #[test]
    fn test_complete_draft_passes() {
        let fields = validate_item_draft(&complete_draft()).unwrap();
        assert_eq!(fields.category, ItemCategory::Accessories);
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut draft = complete_draft();
        draft.title = "   ".into();
        draft.category = None;

        match validate_item_draft(&draft) {
            Err(ValidationError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["title".to_string(), "category".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_report_form_needs_more_than_type() {
        let draft = ItemDraft::for_type(ItemType::Found);
        let err = validate_item_draft(&draft).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields.");
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut draft = complete_draft();
        draft.date = "18/03/2024".into();
        assert!(matches!(
            validate_item_draft(&draft),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_registration_checks_confirmation_first() {
        assert_eq!(
            validate_registration("", "", "a", "b").unwrap_err(),
            ValidationError::PasswordMismatch
        );
        assert!(validate_registration("sam", "sam@example.com", "pw", "pw").is_ok());
        assert!(validate_registration("sam", " ", "pw", "pw").is_err());
    }

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(validate_credentials("sam", "secret").is_ok());
        assert!(validate_credentials(" ", "secret").is_err());
        assert!(validate_credentials("sam", "").is_err());
    }
}
