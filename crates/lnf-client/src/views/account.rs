//! Sign-in and sign-up forms.

use lnf_core::validation::{validate_credentials, validate_registration};
use lnf_core::{SessionProfile, REGISTER_SUCCESS_MESSAGE};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::AuthApi;
use crate::auth::AuthStore;
use crate::error::ClientError;
use crate::views::CANCELLED_MESSAGE;

/// Shown when the login request itself failed.
pub const LOGIN_UNAVAILABLE: &str = "Login failed! Please try again.";
/// Shown when the sign-up request itself failed.
pub const REGISTRATION_FAILED: &str = "Registration failed!";

/// Submits the sign-in form.
pub async fn sign_in<A: AuthApi>(
    auth: &AuthStore,
    api: &A,
    username: &str,
    password: &str,
    cancel: &CancellationToken,
) -> Result<SessionProfile, String> {
    let credentials = validate_credentials(username, password).map_err(|e| e.to_string())?;
    auth.login(api, &credentials, cancel)
        .await
        .map_err(|e| match e {
            ClientError::LoginRejected(message) => message,
            ClientError::Cancelled => CANCELLED_MESSAGE.to_string(),
            other => {
                warn!(error = %other, "Login request failed");
                LOGIN_UNAVAILABLE.to_string()
            }
        })
}

/// Server verdict on a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    /// True only for the backend's success message.
    pub accepted: bool,
    pub message: String,
}

/// Submits the sign-up form.
///
/// A mismatched confirmation never reaches the backend. Any message the
/// backend sends back is returned as-is; only a failed request is an error.
pub async fn sign_up<A: AuthApi>(
    api: &A,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    cancel: &CancellationToken,
) -> Result<RegisterOutcome, String> {
    let registration = validate_registration(username, email, password, confirm_password)
        .map_err(|e| e.to_string())?;

    match api.register(&registration, cancel).await {
        Ok(message) => {
            let message = message.unwrap_or_else(|| REGISTRATION_FAILED.to_string());
            let accepted = message == REGISTER_SUCCESS_MESSAGE;
            info!(username = %registration.username, accepted, "Registration reply");
            Ok(RegisterOutcome { accepted, message })
        }
        Err(ClientError::Cancelled) => Err(CANCELLED_MESSAGE.to_string()),
        Err(ClientError::Http {
            message: Some(message),
            ..
        }) => Ok(RegisterOutcome {
            accepted: false,
            message,
        }),
        Err(e) => {
            warn!(error = %e, "Registration request failed");
            Err(REGISTRATION_FAILED.to_string())
        }
    }
}
