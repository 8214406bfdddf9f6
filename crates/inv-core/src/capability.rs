//! Role capability resolution.
//!
//! Every view gate in the client resolves through [`Capabilities::for_role`],
//! so the role matrix lives in exactly one place. Capabilities are UI
//! affordances only; the server re-checks every action.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Role;

/// What the current session's role may be offered in the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Capabilities {
    pub can_create_assets: bool,
    pub can_edit_assets: bool,
    pub can_change_location: bool,
    pub can_change_status: bool,
    pub can_delete_assets: bool,
    pub can_view_history: bool,
    pub can_manage_locations: bool,
    pub can_manage_types: bool,
    pub can_manage_users: bool,
}

impl Capabilities {
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        let admin = matches!(role, Role::Admin);
        let manager_up = matches!(role, Role::Admin | Role::Manager);
        Self {
            can_create_assets: manager_up,
            can_edit_assets: manager_up,
            can_change_location: manager_up,
            can_change_status: admin,
            can_delete_assets: admin,
            can_view_history: admin,
            can_manage_locations: manager_up,
            can_manage_types: manager_up,
            can_manage_users: admin,
        }
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Navigable sections of the client, role-filtered the way the navigation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Assets,
    Locations,
    Types,
    Users,
    Changelog,
}

impl Section {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Assets,
        Self::Locations,
        Self::Types,
        Self::Users,
        Self::Changelog,
    ];

    /// Whether the section is offered to a role. The changelog is reachable
    /// by every authenticated role even though the navigation omits it.
    #[must_use]
    pub const fn visible_to(self, role: Role) -> bool {
        match self {
            Self::Dashboard | Self::Assets | Self::Changelog => true,
            Self::Locations | Self::Types => matches!(role, Role::Admin | Role::Manager),
            Self::Users => matches!(role, Role::Admin),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Assets => "assets",
            Self::Locations => "locations",
            Self::Types => "types",
            Self::Users => "users",
            Self::Changelog => "changelog",
        }
    }

    /// Sections a role sees, in navigation order.
    #[must_use]
    pub fn visible_sections(role: Role) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|section| section.visible_to(role))
            .collect()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn admin_has_every_capability() {
        let caps = Capabilities::for_role(Role::Admin);
        assert!(caps.can_create_assets);
        assert!(caps.can_edit_assets);
        assert!(caps.can_change_location);
        assert!(caps.can_change_status);
        assert!(caps.can_delete_assets);
        assert!(caps.can_view_history);
        assert!(caps.can_manage_locations);
        assert!(caps.can_manage_types);
        assert!(caps.can_manage_users);
    }

    #[test]
    fn manager_creates_and_relocates_but_never_deletes() {
        let caps = Capabilities::for_role(Role::Manager);
        assert!(caps.can_create_assets);
        assert!(caps.can_edit_assets);
        assert!(caps.can_change_location);
        assert!(!caps.can_change_status);
        assert!(!caps.can_delete_assets);
        assert!(!caps.can_view_history);
        assert!(caps.can_manage_locations);
        assert!(caps.can_manage_types);
        assert!(!caps.can_manage_users);
    }

    #[test]
    fn inventory_role_is_read_only() {
        let caps = Capabilities::for_role(Role::Inventory);
        assert!(!caps.can_create_assets);
        assert!(!caps.can_edit_assets);
        assert!(!caps.can_change_location);
        assert!(!caps.can_change_status);
        assert!(!caps.can_delete_assets);
        assert!(!caps.can_view_history);
        assert!(!caps.can_manage_locations);
        assert!(!caps.can_manage_types);
        assert!(!caps.can_manage_users);
    }

    #[test]
    fn section_visibility_follows_navigation() {
        assert_eq!(
            Section::visible_sections(Role::Admin),
            Section::ALL.to_vec()
        );
        assert_eq!(
            Section::visible_sections(Role::Manager),
            vec![
                Section::Dashboard,
                Section::Assets,
                Section::Locations,
                Section::Types,
                Section::Changelog
            ]
        );
        assert_eq!(
            Section::visible_sections(Role::Inventory),
            vec![Section::Dashboard, Section::Assets, Section::Changelog]
        );
    }
}
