use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::enums::Role;

/// A staff account as returned by the users resource.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleRef,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Embedded role record on a user row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RoleRef {
    pub id: i64,
    pub name: Role,
}

/// Lightweight user embed carried by asset rows and changelog entries.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl User {
    /// Full display name, falling back to the username when both name parts
    /// are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

impl UserRef {
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_wire_user_with_camel_case_timestamp() {
        let json = r#"{
            "id": 4,
            "username": "mquintero",
            "email": "mq@example.com",
            "first_name": "Maria",
            "last_name": "Quintero",
            "role": {"id": 2, "name": "manager"},
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role.name, Role::Manager);
        assert_eq!(user.display_name(), "Maria Quintero");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = UserRef {
            id: 1,
            first_name: String::new(),
            last_name: String::new(),
            username: "jdoe".into(),
        };
        assert_eq!(user.display_name(), "jdoe");
    }
}
