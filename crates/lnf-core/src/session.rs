//! # Session
//!
//! The signed-in state of the client and the schema of the login reply.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐   login reply validated    ┌──────────────────────┐    │
//! │   │ Anonymous │ ─────────────────────────► │ Authenticated        │    │
//! │   │           │                            │   { profile }        │    │
//! │   │           │ ◄───────────────────────── │                      │    │
//! │   └───────────┘   logout / corrupt blob    └──────────────────────┘    │
//! │                                                                         │
//! │   Persisted form of the profile: {"id":..,"username":..,"email":..}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No password or token is verified locally; the only trust anchor is the
//! backend's success message.

use serde::{Deserialize, Serialize};

use crate::types::UserId;
use crate::LOGIN_SUCCESS_MESSAGE;

/// Cached account record of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionProfile {
    /// Parses the persisted `user` blob.
    pub fn from_persisted(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serializes the profile for persistence.
    pub fn to_persisted(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Client-side session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { profile: SessionProfile },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn profile(&self) -> Option<&SessionProfile> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { profile } => Some(profile),
        }
    }
}

// =============================================================================
// Login Response Schema
// =============================================================================

/// Nested account block of a login reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of a `POST /api/auth/login` reply.
///
/// The backend has shipped the account either nested under `user` or
/// flattened at the top level; both shapes are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Bearer token, when the backend issues one.
    #[serde(default)]
    pub token: Option<String>,
}

/// A login reply that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub profile: SessionProfile,
    pub token: Option<String>,
}

/// Why a login reply was not accepted. The string is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRejection(pub String);

impl LoginResponse {
    /// Fallback text when the backend gives no reason.
    pub const DEFAULT_FAILURE: &'static str = "Login failed! Invalid credentials.";

    pub fn is_success_message(&self) -> bool {
        self.message.as_deref() == Some(LOGIN_SUCCESS_MESSAGE)
    }

    /// Validates the reply of a completed login request.
    ///
    /// ## Rules
    /// - the HTTP status must be 2xx
    /// - the message must be exactly [`LOGIN_SUCCESS_MESSAGE`]
    /// - an account id must be present (nested or top level)
    ///
    /// The username falls back to the one typed into the form.
    pub fn validate(
        self,
        status_ok: bool,
        typed_username: &str,
    ) -> Result<LoginGrant, LoginRejection> {
        if !status_ok || !self.is_success_message() {
            let reason = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_FAILURE.to_string());
            return Err(LoginRejection(reason));
        }

        let nested = self.user.unwrap_or_default();
        let id = nested.id.or(self.id).ok_or_else(|| {
            LoginRejection("Login response did not include an account id.".to_string())
        })?;
        let non_empty = |u: &String| !u.is_empty();
        let username = nested
            .username
            .filter(non_empty)
            .or(self.username.filter(non_empty))
            .unwrap_or_else(|| typed_username.to_string());
        let email = nested.email.or(self.email);

        Ok(LoginGrant {
            profile: SessionProfile {
                id,
                username,
                email,
            },
            token: self.token.filter(|t| !t.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LoginResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nested_user_is_accepted() {
        let reply = parse(
            r#"{"message":"Login successful!","user":{"id":4,"username":"sam","email":"s@x.io"}}"#,
        );
        let grant = reply.validate(true, "typed").unwrap();
        assert_eq!(grant.profile.id, 4);
        assert_eq!(grant.profile.username, "sam");
        assert_eq!(grant.profile.email.as_deref(), Some("s@x.io"));
        assert_eq!(grant.token, None);
    }

    #[test]
    fn test_flat_reply_falls_back_to_typed_username() {
        let reply = parse(r#"{"message":"Login successful!","id":9,"token":"abc"}"#);
        let grant = reply.validate(true, "ana").unwrap();
        assert_eq!(grant.profile.id, 9);
        assert_eq!(grant.profile.username, "ana");
        assert_eq!(grant.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_wrong_message_is_rejected() {
        let reply = parse(r#"{"message":"Invalid credentials","id":9}"#);
        assert_eq!(
            reply.validate(true, "ana").unwrap_err(),
            LoginRejection("Invalid credentials".to_string())
        );

        let reply = parse(r#"{"message":"login successful","id":9}"#);
        assert!(reply.validate(true, "ana").is_err());
    }

    #[test]
    fn test_error_status_is_rejected_even_with_success_message() {
        let reply = parse(r#"{"message":"Login successful!","id":9}"#);
        assert!(reply.validate(false, "ana").is_err());
    }

    #[test]
    fn test_missing_message_uses_default_text() {
        let reply = parse(r#"{}"#);
        assert_eq!(
            reply.validate(true, "ana").unwrap_err().0,
            LoginResponse::DEFAULT_FAILURE
        );
    }

    #[test]
    fn test_blank_nested_username_falls_back_to_top_level() {
        let reply = parse(
            r#"{"message":"Login successful!","user":{"id":3,"username":""},"username":"jordan"}"#,
        );
        let grant = reply.validate(true, "typed").unwrap();
        assert_eq!(grant.profile.username, "jordan");

        let reply = parse(r#"{"message":"Login successful!","id":3,"username":""}"#);
        assert_eq!(reply.validate(true, "typed").unwrap().profile.username, "typed");
    }

    #[test]
    fn test_success_without_id_is_rejected() {
        let reply = parse(r#"{"message":"Login successful!"}"#);
        assert!(reply.validate(true, "ana").is_err());
    }

    #[test]
    fn test_persisted_profile_round_trip_shape() {
        let profile = SessionProfile::from_persisted(r#"{"id":1,"username":"sam"}"#).unwrap();
        assert_eq!(profile.email, None);
        assert!(SessionProfile::from_persisted("{not json").is_err());
        assert!(SessionProfile::from_persisted(r#""just a string""#).is_err());

        let session = Session::Authenticated { profile };
        assert!(session.is_authenticated());
        assert_eq!(session.profile().map(|p| p.id), Some(1));
        assert!(!Session::Anonymous.is_authenticated());
    }
}
