//! # Error Types
//!
//! Domain-specific error types for lnf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lnf-core errors (this file)                                           │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Form checks before submission                  │
//! │                                                                         │
//! │  lnf-client errors (separate crate)                                    │
//! │  └── ClientError      - Network / HTTP / decode / storage failures     │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → CliError → stdout   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A category string outside the fixed taxonomy.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A type string other than LOST / FOUND.
    #[error("Unknown item type: {0}")]
    UnknownItemType(String),

    /// The action needs a signed-in user.
    ///
    /// ## When This Occurs
    /// - Opening my-items or a report form while anonymous
    /// - The persisted profile has no user id
    #[error("Please sign in to continue.")]
    NotSignedIn,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Client-side form check failures.
///
/// Each message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required report fields are empty.
    #[error("Please fill in all required fields.")]
    MissingFields { fields: Vec<String> },

    /// A single required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Sign-up password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Invalid format (e.g. a date that is not YYYY-MM-DD).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        let err = ValidationError::MissingFields {
            fields: vec!["title".to_string()],
        };
        assert_eq!(err.to_string(), "Please fill in all required fields.");
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::PasswordMismatch.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Passwords do not match");
    }
}
