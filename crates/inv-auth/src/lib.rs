//! # inv-auth
//!
//! Bearer-token session management for the Inventra CLI.
//!
//! Provides password login against the API (`reqwest`), unverified claims
//! decoding (`base64` + `serde_json`), OS keychain token storage (`keyring`)
//! with env and file fallbacks, a persisted identity mirror, and the shared
//! [`SessionStore`] the rest of the client is built around.

pub mod claims;
pub mod error;
pub mod identity_store;
pub mod session;
pub mod token_store;

pub use claims::TokenClaims;
pub use error::AuthError;
pub use session::SessionStore;
pub use token_store::TokenSource;
