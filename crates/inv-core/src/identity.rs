use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Authenticated identity derived from the bearer token's claim payload.
///
/// Produced by `inv-auth`, consumed everywhere a view gate or display name is
/// needed. Data only, no auth logic.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
}

impl SessionIdentity {
    /// Full display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let identity = SessionIdentity {
            id: 1,
            username: "jdoe".into(),
            email: None,
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            role: Role::Admin,
        };
        assert_eq!(identity.display_name(), "Jane Doe");
    }

    #[test]
    fn roundtrips_through_storage_json() {
        let identity = SessionIdentity {
            id: 7,
            username: "ops".into(),
            email: Some("ops@example.com".into()),
            first_name: None,
            last_name: None,
            role: Role::Inventory,
        };
        let json = serde_json::to_string(&identity).unwrap();
        let back: SessionIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
        assert_eq!(back.display_name(), "ops");
    }
}
