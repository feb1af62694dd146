//! # Auth Store
//!
//! Owns the signed-in [`Session`] and keeps it in step with the persisted
//! `user` / `token` keys.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   load(storage)                                                        │
//! │     "user" parses ─────────────────────────► Authenticated { profile } │
//! │     "user" missing ────────────────────────► Anonymous                 │
//! │     "user" corrupt ──► purge user + token ─► Anonymous                 │
//! │                                                                         │
//! │   login(api, credentials)                                              │
//! │     2xx ∧ "Login successful!" ∧ id ──► persist ──► Authenticated       │
//! │     anything else ───────► purge ──► Anonymous + LoginRejected / error │
//! │     cancelled ───────────► unchanged                                   │
//! │                                                                         │
//! │   logout()  ─────────────► purge ──► Anonymous                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is passed explicitly to the views that need it. Nothing here
//! verifies passwords or tokens.

use std::sync::Arc;

use lnf_core::{Credentials, LoginResponse, Session, SessionProfile};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::error::{ClientError, ClientResult};
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};

/// Session holder shared by the views.
pub struct AuthStore {
    session: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore").finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Restores the session from storage.
    ///
    /// A `user` value that does not parse as a profile is deleted together
    /// with any token, and the session starts anonymous.
    pub fn load(storage: Arc<dyn SessionStorage>) -> ClientResult<Self> {
        let session = match storage.get(USER_KEY)? {
            None => Session::Anonymous,
            Some(raw) => match SessionProfile::from_persisted(&raw) {
                Ok(profile) => {
                    debug!(user_id = profile.id, "Restored session");
                    Session::Authenticated { profile }
                }
                Err(e) => {
                    warn!(error = %e, "Persisted session is corrupt, purging");
                    storage.remove(USER_KEY)?;
                    storage.remove(TOKEN_KEY)?;
                    Session::Anonymous
                }
            },
        };

        Ok(AuthStore {
            session: RwLock::new(session),
            storage,
        })
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Profile of the signed-in user.
    pub async fn profile(&self) -> Option<SessionProfile> {
        self.session.read().await.profile().cloned()
    }

    /// Persisted bearer token, if the backend issued one.
    pub fn token(&self) -> ClientResult<Option<String>> {
        self.storage.get(TOKEN_KEY)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Signs in.
    ///
    /// Returns the new profile, or [`ClientError::LoginRejected`] carrying
    /// the text to show. Transport failures are returned as they are.
    pub async fn login<A: AuthApi>(
        &self,
        api: &A,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> ClientResult<SessionProfile> {
        info!(username = %credentials.username, "Signing in");

        let outcome = match api.login(credentials, cancel).await {
            Ok(reply) => reply
                .body
                .validate(reply.status_ok, &credentials.username)
                .map_err(|rejection| ClientError::LoginRejected(rejection.0)),
            Err(ClientError::Http { message, .. }) => Err(ClientError::LoginRejected(
                message.unwrap_or_else(|| LoginResponse::DEFAULT_FAILURE.to_string()),
            )),
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => Err(e),
        };

        let grant = match outcome {
            Ok(grant) => grant,
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                if let Err(clear_err) = self.clear().await {
                    warn!(error = %clear_err, "Failed to clear session after rejected sign-in");
                }
                return Err(e);
            }
        };

        let persisted = grant
            .profile
            .to_persisted()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set(USER_KEY, &persisted)?;
        match &grant.token {
            Some(token) => self.storage.set(TOKEN_KEY, token)?,
            None => self.storage.remove(TOKEN_KEY)?,
        }

        *self.session.write().await = Session::Authenticated {
            profile: grant.profile.clone(),
        };
        info!(user_id = grant.profile.id, "Signed in");
        Ok(grant.profile)
    }

    /// Signs out and deletes the persisted session.
    pub async fn logout(&self) -> ClientResult<()> {
        self.clear().await?;
        info!("Signed out");
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.session.write().await = Session::Anonymous;
        self.storage.remove(USER_KEY)?;
        self.storage.remove(TOKEN_KEY)?;
        Ok(())
    }
}
