use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use inv_core::capability::Capabilities;
use inv_core::enums::Role;
use inv_core::identity::SessionIdentity;
use inv_core::wire::normalize_error_message;
use serde::{Deserialize, Serialize};

use crate::claims::TokenClaims;
use crate::error::AuthError;
use crate::{identity_store, token_store};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Response body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Shared session state.
///
/// One store is created at startup, wrapped in an `Arc`, and handed to every
/// layer that needs the identity or a role gate. The store is the single
/// authority on who is logged in; nothing else reads credential storage
/// directly.
#[derive(Debug, Default)]
pub struct SessionStore {
    identity: RwLock<Option<SessionIdentity>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the persisted identity, if any. Runs once at startup before
    /// the first command. Purely local; no network round trip.
    pub fn hydrate(&self) {
        if let Some(identity) = identity_store::load() {
            *self.write_guard() = Some(identity);
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_guard().is_some()
    }

    /// Snapshot of the current identity.
    #[must_use]
    pub fn identity(&self) -> Option<SessionIdentity> {
        self.read_guard().clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read_guard().as_ref().map(|identity| identity.role)
    }

    /// Capabilities of the current role; `None` when logged out.
    #[must_use]
    pub fn capabilities(&self) -> Option<Capabilities> {
        self.role().map(Capabilities::for_role)
    }

    /// Current bearer token, read fresh from storage on every call so a token
    /// replaced outside this process is picked up.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        token_store::load()
    }

    /// Authenticate against the API and persist the session.
    ///
    /// On success the token and its decoded identity are stored together and
    /// the in-memory state updated. On failure nothing is written: a rejected
    /// login never disturbs an existing session.
    ///
    /// # Errors
    ///
    /// `AuthError::LoginFailed` carries the server's message (or the
    /// normalized fallback) when credentials are rejected; `AuthError::Http`
    /// when the request itself fails.
    pub async fn login(
        &self,
        http: &reqwest::Client,
        login_url: &str,
        username: &str,
        password: &str,
    ) -> Result<SessionIdentity, AuthError> {
        let response = http
            .post(login_url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::LoginFailed(normalize_error_message(&body)));
        }

        let LoginResponse { token } = response.json().await?;
        let identity = TokenClaims::decode(&token)?.to_identity();

        token_store::store(&token)?;
        if let Err(error) = identity_store::save(&identity) {
            // Keep the two stores consistent: roll the token back
            let _ = token_store::delete();
            return Err(error);
        }
        *self.write_guard() = Some(identity.clone());

        tracing::debug!(username = %identity.username, "session established");
        Ok(identity)
    }

    /// Clear the session: in-memory identity plus both storage entries.
    /// Local only; the API has no logout endpoint.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered. Both stores are attempted
    /// regardless.
    pub fn logout(&self) -> Result<(), AuthError> {
        *self.write_guard() = None;
        let token_result = token_store::delete();
        let identity_result = identity_store::delete();
        token_result.and(identity_result)
    }

    /// Tear the session down after the API rejected our token. Same clearing
    /// as [`Self::logout`], but storage errors are only logged: the session
    /// is gone either way.
    pub fn teardown(&self) {
        tracing::warn!("session rejected by the API; clearing stored credentials");
        if let Err(error) = self.logout() {
            tracing::warn!(%error, "stored credentials could not be fully cleared");
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Option<SessionIdentity>> {
        self.identity.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Option<SessionIdentity>> {
        self.identity.write().unwrap_or_else(PoisonError::into_inner)
    }
}
