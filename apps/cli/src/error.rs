//! # CLI Error Type
//!
//! What a failed command prints, and the exit status it ends with.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  view / AuthStore / HttpClient                                         │
//! │         │                                                               │
//! │         ├── Result<_, String>  (page text) ──► CliError::action(...)   │
//! │         │                                                               │
//! │         └── ClientError ──────────────────────► CliError::from(...)    │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                               stderr: "error: <message>"                │
//! │                               --json: {"code":"FORBIDDEN","message":..} │
//! │                               exit status from ErrorCode                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use lnf_client::ClientError;
use serde::Serialize;
use thiserror::Error;

/// Error printed by a command.
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Text shown to the user
    pub message: String,
}

/// Error codes, also used to pick the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form check failed before any request
    ValidationError,

    /// Page needs a signed-in user
    NotSignedIn,

    /// Backend refused the action (403)
    Forbidden,

    /// Item or page does not exist
    NotFound,

    /// Backend rejected the request for another reason
    RequestFailed,

    /// No reply from the backend
    NetworkError,

    /// Request scope cancelled (Ctrl+C)
    Cancelled,

    /// Configuration or session file problem
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::NotSignedIn => 3,
            ErrorCode::Forbidden => 4,
            ErrorCode::NotFound => 5,
            ErrorCode::RequestFailed => 6,
            ErrorCode::NetworkError => 7,
            ErrorCode::Cancelled => 130,
            ErrorCode::ConfigError => 78,
            ErrorCode::Internal => 1,
        })
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Wraps the text a page action returned.
    pub fn action(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::RequestFailed, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::NotFound, message)
    }

    pub fn cancelled() -> Self {
        CliError::new(ErrorCode::Cancelled, lnf_client::views::CANCELLED_MESSAGE)
    }

    pub fn not_signed_in() -> Self {
        CliError::new(ErrorCode::NotSignedIn, "Please sign in to continue.")
    }
}

/// Converts client errors to CLI errors.
impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match &err {
            ClientError::Cancelled => CliError::cancelled(),
            ClientError::NotSignedIn => CliError::not_signed_in(),
            ClientError::Validation(_) | ClientError::Core(_) => {
                CliError::validation(err.to_string())
            }
            ClientError::LoginRejected(message) => CliError::action(message.clone()),
            ClientError::Http { status: 403, .. } => CliError::new(ErrorCode::Forbidden, err.to_string()),
            ClientError::Http { status: 404, .. } => CliError::not_found(err.to_string()),
            ClientError::Http { .. } | ClientError::Decode(_) => CliError::action(err.to_string()),
            ClientError::Network(_) | ClientError::Timeout => {
                CliError::new(ErrorCode::NetworkError, err.to_string())
            }
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_)
            | ClientError::Storage(_) => CliError::new(ErrorCode::ConfigError, err.to_string()),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_mapping() {
        let err: CliError = ClientError::Http {
            status: 403,
            message: None,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err: CliError = ClientError::Network("refused".into()).into();
        assert_eq!(err.code, ErrorCode::NetworkError);

        let err: CliError = ClientError::Cancelled.into();
        assert_eq!(err.code, ErrorCode::Cancelled);
        assert_eq!(err.message, "Request cancelled.");

        let err: CliError = ClientError::LoginRejected("Invalid credentials".into()).into();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_serializes_code_and_message() {
        let json = serde_json::to_value(CliError::not_found("Item not found.")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Item not found.");
    }
}
