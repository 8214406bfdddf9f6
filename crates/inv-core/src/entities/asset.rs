use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ChangelogEntry, FieldValue, Identified, LocationRef, TypeRef, UserRef};
use crate::enums::AssetStatus;
use crate::history::TrackedField;

/// A tracked physical asset.
///
/// The joined `location`/`type`/`responsible` embeds are present on list rows
/// and detail responses but may be missing on older or partial payloads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub serial_number: i64,
    pub type_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub responsible_id: i64,
    pub location_id: i64,
    pub status: AssetStatus,
    pub cost: f64,
    pub acquisition_date: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub location: Option<LocationRef>,
    #[serde(rename = "type", default)]
    pub type_ref: Option<TypeRef>,
    #[serde(default)]
    pub responsible: Option<UserRef>,
}

impl Asset {
    /// Live value of a tracked field, as compared against history shadows.
    /// `None` means the field is unset on this asset (e.g. no description).
    #[must_use]
    pub fn current_value(&self, field: TrackedField) -> Option<FieldValue> {
        match field {
            TrackedField::Name => Some(FieldValue::Text(self.name.clone())),
            TrackedField::SerialNumber => Some(FieldValue::Int(self.serial_number)),
            TrackedField::Description => self.description.clone().map(FieldValue::Text),
            TrackedField::Cost => Some(FieldValue::Number(self.cost)),
            TrackedField::Status => Some(FieldValue::Text(self.status.as_str().to_owned())),
            TrackedField::LocationId => Some(FieldValue::Int(self.location_id)),
            TrackedField::ResponsibleId => Some(FieldValue::Int(self.responsible_id)),
        }
    }
}

impl Identified for Asset {
    fn id(&self) -> i64 {
        self.id
    }
}

// ---------------------------------------------------------------------------
// List / stats / detail response shapes
// ---------------------------------------------------------------------------

/// One page of the asset list, with server-computed totals.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssetPage {
    pub assets: Vec<Asset>,
    pub total: u32,
    #[serde(rename = "activeAssets")]
    pub active_assets: u32,
    #[serde(rename = "inactiveAssets")]
    pub inactive_assets: u32,
    #[serde(rename = "decommissionedAssets")]
    pub decommissioned_assets: u32,
    pub page: u32,
    pub limit: u32,
}

impl AssetPage {
    /// An empty first page, the held state before any fetch completes.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            assets: Vec::new(),
            total: 0,
            active_assets: 0,
            inactive_assets: 0,
            decommissioned_assets: 0,
            page: 1,
            limit: 10,
        }
    }
}

impl Default for AssetPage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Inventory-wide stats for the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssetStats {
    pub cost: f64,
    pub active: u32,
    pub inactive: u32,
}

/// Detail response for one asset: the asset plus its embedded changelog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssetDetail {
    #[serde(default)]
    pub asset: Option<Asset>,
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deserializes_list_row_with_embeds() {
        let json = r#"{
            "id": 7,
            "name": "Thinkpad T14",
            "serial_number": 99120,
            "type_id": 2,
            "description": null,
            "responsible_id": 4,
            "location_id": 3,
            "status": "active",
            "cost": 1250.5,
            "acquisition_date": "2024-05-01T00:00:00Z",
            "created_by": 1,
            "location": {"id": 3, "name": "HQ"},
            "type": {"id": 2, "name": "Laptop", "category": "computers"},
            "responsible": {"id": 4, "first_name": "Maria", "last_name": "Quintero", "username": "mquintero"}
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.type_ref.as_ref().unwrap().category, "computers");
        assert_eq!(asset.description, None);
        assert_eq!(asset.status, AssetStatus::Active);
    }

    #[test]
    fn deserializes_page_with_camel_case_counts() {
        let json = r#"{
            "assets": [],
            "total": 20,
            "activeAssets": 12,
            "inactiveAssets": 6,
            "decommissionedAssets": 2,
            "page": 2,
            "limit": 9
        }"#;
        let page: AssetPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 20);
        assert_eq!(page.active_assets, 12);
        assert_eq!(page.limit, 9);
    }

    #[test]
    fn detail_tolerates_missing_asset() {
        let detail: AssetDetail = serde_json::from_str(r#"{"changelog": []}"#).unwrap();
        assert_eq!(detail.asset, None);
        assert!(detail.changelog.is_empty());
    }
}
