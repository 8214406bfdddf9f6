use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use inv_core::enums::Role;
use inv_core::identity::SessionIdentity;
use serde::Deserialize;

use crate::error::AuthError;

/// Claims carried in the bearer token's payload segment.
///
/// The login endpoint signs the logged-in user straight into the token, so the
/// payload is the user object itself. The client only reads the payload to
/// learn who is logged in; signature verification stays on the server, which
/// re-checks the token on every request.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: RoleClaim,
    /// Expiration as a Unix timestamp (`exp` claim), when the server sets one.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Role object embedded in the claims payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleClaim {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: Role,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT without verifying its signature.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ClaimsDecode` if the token has no payload segment,
    /// the segment is not base64url, or the payload is not a claims object.
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| AuthError::ClaimsDecode("token is not a JWT".into()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| AuthError::ClaimsDecode(format!("payload is not base64url: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::ClaimsDecode(format!("payload is not a claims object: {e}")))
    }

    /// Convert to the lightweight identity stored and passed across crates.
    #[must_use]
    pub fn to_identity(&self) -> SessionIdentity {
        SessionIdentity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role.name,
        }
    }

    /// Token expiration time, when the `exp` claim is present.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn encode_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.fake-signature")
    }

    #[test]
    fn decode_reads_the_user_payload() {
        let token = encode_token(&serde_json::json!({
            "id": 4,
            "username": "mgarcia",
            "email": "mgarcia@example.com",
            "first_name": "María",
            "last_name": "García",
            "role": {"id": 2, "name": "manager"},
            "exp": 1_900_000_000,
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.id, 4);
        assert_eq!(claims.username, "mgarcia");
        assert_eq!(claims.role.name, Role::Manager);
        assert_eq!(claims.role.id, Some(2));
        assert_eq!(
            claims.expires_at(),
            DateTime::from_timestamp(1_900_000_000, 0)
        );
    }

    #[test]
    fn decode_tolerates_missing_optional_fields() {
        let token = encode_token(&serde_json::json!({
            "id": 9,
            "username": "auditor",
            "role": {"name": "inventory"},
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.email, None);
        assert_eq!(claims.first_name, None);
        assert_eq!(claims.exp, None);
        assert_eq!(claims.expires_at(), None);
    }

    #[test]
    fn to_identity_maps_every_field() {
        let token = encode_token(&serde_json::json!({
            "id": 1,
            "username": "admin",
            "email": "admin@example.com",
            "first_name": "Ada",
            "last_name": "Admin",
            "role": {"id": 1, "name": "admin"},
        }));

        let identity = TokenClaims::decode(&token).unwrap().to_identity();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.email.as_deref(), Some("admin@example.com"));
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.display_name(), "Ada Admin");
    }

    #[test]
    fn non_jwt_strings_are_rejected() {
        assert!(TokenClaims::decode("not-a-token").is_err());
        assert!(TokenClaims::decode("two.%%%invalid%%%.segments").is_err());

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"plain text"));
        assert!(TokenClaims::decode(&not_json).is_err());
    }
}
