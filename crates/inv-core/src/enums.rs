//! Status, role, and change-kind enums for Inventra.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the inventory API's wire values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an asset. Transitions are server-enforced; the client
/// only gates who may request one (see `capability`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    Inactive,
    Decommissioned,
}

impl AssetStatus {
    /// All statuses, in the order selection widgets offer them.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Decommissioned];

    /// Return the wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Decommissioned => "decommissioned",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Staff role. Determines view capabilities only; the server re-enforces
/// every permission on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Inventory,
}

impl Role {
    /// All roles, in the order selection widgets offer them.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::Inventory];

    /// Return the wire string for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Inventory => "inventory",
        }
    }

    /// Numeric identifier the users resource expects in create/update
    /// payloads. Fixed three-entry table; unknown roles cannot exist here, so
    /// a payload can never carry an undefined id.
    #[must_use]
    pub const fn server_id(self) -> i64 {
        match self {
            Self::Admin => 1,
            Self::Manager => 2,
            Self::Inventory => 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangeKind
// ---------------------------------------------------------------------------

/// Canonical kind of a changelog entry.
///
/// The wire value is free-form: some endpoints emit `create`, others
/// `created`. [`ChangeKind::parse`] accepts both tenses; unknown kinds stay
/// raw strings on the entry and render as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
    Relocated,
    CostUpdated,
    StatusChanged,
    Decommissioned,
}

impl ChangeKind {
    /// Parse a wire `change_type` value, tolerating past-tense spellings.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "create" | "created" => Some(Self::Create),
            "update" | "updated" => Some(Self::Update),
            "delete" | "deleted" => Some(Self::Delete),
            "relocated" => Some(Self::Relocated),
            "cost_updated" => Some(Self::CostUpdated),
            "status_changed" => Some(Self::StatusChanged),
            "decommissioned" => Some(Self::Decommissioned),
            _ => None,
        }
    }

    /// Display label for history and changelog views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
            Self::Relocated => "Relocated",
            Self::CostUpdated => "Cost updated",
            Self::StatusChanged => "Status changed",
            Self::Decommissioned => "Decommissioned",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Relocated => "relocated",
            Self::CostUpdated => "cost_updated",
            Self::StatusChanged => "status_changed",
            Self::Decommissioned => "decommissioned",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a raw wire `change_type`, falling back to the raw value
/// for kinds the client does not know.
#[must_use]
pub fn change_kind_label(raw: &str) -> &str {
    ChangeKind::parse(raw).map_or(raw, |kind| kind.label())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(status_active, AssetStatus, AssetStatus::Active, "active");
    test_serde_roundtrip!(
        status_decommissioned,
        AssetStatus,
        AssetStatus::Decommissioned,
        "decommissioned"
    );

    test_serde_roundtrip!(role_admin, Role, Role::Admin, "admin");
    test_serde_roundtrip!(role_inventory, Role, Role::Inventory, "inventory");

    test_serde_roundtrip!(kind_create, ChangeKind, ChangeKind::Create, "create");
    test_serde_roundtrip!(
        kind_cost_updated,
        ChangeKind,
        ChangeKind::CostUpdated,
        "cost_updated"
    );

    // --- Role id table ---

    #[test]
    fn role_server_ids_match_fixed_table() {
        assert_eq!(Role::Admin.server_id(), 1);
        assert_eq!(Role::Manager.server_id(), 2);
        assert_eq!(Role::Inventory.server_id(), 3);
    }

    // --- ChangeKind parsing ---

    #[test]
    fn parses_both_tenses() {
        assert_eq!(ChangeKind::parse("create"), Some(ChangeKind::Create));
        assert_eq!(ChangeKind::parse("created"), Some(ChangeKind::Create));
        assert_eq!(ChangeKind::parse("updated"), Some(ChangeKind::Update));
        assert_eq!(
            ChangeKind::parse("status_changed"),
            Some(ChangeKind::StatusChanged)
        );
    }

    #[test]
    fn unknown_kind_parses_to_none() {
        assert_eq!(ChangeKind::parse("migrated"), None);
    }

    #[test]
    fn unknown_kind_label_falls_back_to_raw() {
        assert_eq!(change_kind_label("migrated"), "migrated");
        assert_eq!(change_kind_label("decommissioned"), "Decommissioned");
    }
}
