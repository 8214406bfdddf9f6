//! API error types.

use inv_auth::AuthError;
use thiserror::Error;

/// Errors surfaced by the API layer.
///
/// `Api` and `Forbidden` carry messages that are already user-facing: the
/// fallback chain in [`inv_core::wire`] runs before an error leaves this
/// crate, so callers print `{error}` and get the same text a server toast
/// would have shown.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response; `message` already passed the fallback chain.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The API rejected our token; the session has been torn down.
    #[error("session expired; run `inva login` to sign in again")]
    Unauthorized,

    /// The current role may not perform the action.
    #[error("{0}")]
    Forbidden(String),

    /// A response did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// Session errors bubbled from the auth layer.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
