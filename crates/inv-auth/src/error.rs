use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not logged in; run `inva login` first")]
    NotAuthenticated,

    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("could not decode token claims: {0}")]
    ClaimsDecode(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("identity store error: {0}")]
    IdentityStoreError(String),

    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),
}
