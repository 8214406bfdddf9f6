//! Session guards shared by the one-shot commands.

use inv_auth::AuthError;
use inv_core::identity::SessionIdentity;

use crate::context::AppContext;

/// The current identity, or the standard log-in hint.
///
/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] when no session is hydrated.
pub fn require_identity(ctx: &AppContext) -> anyhow::Result<SessionIdentity> {
    ctx.session
        .identity()
        .ok_or_else(|| AuthError::NotAuthenticated.into())
}

/// Unwrap a session-gated fetch. The service skips the request and returns
/// `None` when no session is established; one-shot commands surface that
/// as the log-in hint.
///
/// # Errors
///
/// Returns [`AuthError::NotAuthenticated`] for `None`.
pub fn require_fetched<T>(fetched: Option<T>) -> anyhow::Result<T> {
    fetched.ok_or_else(|| AuthError::NotAuthenticated.into())
}
