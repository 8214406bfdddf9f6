use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::UserRef;
use crate::history::TrackedField;

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A loosely typed scalar carried by changelog shadow fields and explicit
/// diff values.
///
/// The backend predates strict typing here: numeric fields sometimes arrive
/// as strings. Comparison and display go through [`FieldValue::coerce`], so
/// `500` and `"500"` are one value.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// String form used for display and for change comparison.
    #[must_use]
    pub fn coerce(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Other(v) => v.to_string(),
        }
    }

    /// Whether the value is present in the JSON sense; an explicit `null`
    /// counts as absent for reconciliation.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Other(serde_json::Value::Null))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ---------------------------------------------------------------------------
// FieldChange
// ---------------------------------------------------------------------------

/// One field-level before/after pair, either server-supplied or reconciled
/// client-side.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FieldChange {
    pub field: String,
    #[serde(rename = "oldValue", default)]
    pub old_value: Option<FieldValue>,
    #[serde(rename = "newValue", default)]
    pub new_value: Option<FieldValue>,
}

// ---------------------------------------------------------------------------
// ChangelogEntry
// ---------------------------------------------------------------------------

/// An immutable audit record of one mutation to one asset.
///
/// `changes` is authoritative when present and non-empty. Older records carry
/// only the flat `old_<field>` shadow snapshots, which `history` reconciles
/// into diffs for display.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ChangelogEntry {
    pub id: i64,
    pub asset_id: i64,
    pub user_id: i64,
    pub change_type: String,
    #[serde(default)]
    pub change_reason: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub changes: Option<Vec<FieldChange>>,
    #[serde(default)]
    pub old_name: Option<FieldValue>,
    #[serde(default)]
    pub old_serial_number: Option<FieldValue>,
    #[serde(default)]
    pub old_type_id: Option<FieldValue>,
    #[serde(default)]
    pub old_description: Option<FieldValue>,
    #[serde(default)]
    pub old_responsible_id: Option<FieldValue>,
    #[serde(default)]
    pub old_location_id: Option<FieldValue>,
    #[serde(default)]
    pub old_cost: Option<FieldValue>,
    #[serde(default)]
    pub old_status: Option<FieldValue>,
    #[serde(default)]
    pub old_acquisition_date: Option<FieldValue>,
}

impl ChangelogEntry {
    /// Shadow `old_<field>` snapshot stored on this entry, skipping explicit
    /// nulls.
    #[must_use]
    pub fn shadow(&self, field: TrackedField) -> Option<&FieldValue> {
        let value = match field {
            TrackedField::Name => self.old_name.as_ref(),
            TrackedField::SerialNumber => self.old_serial_number.as_ref(),
            TrackedField::Description => self.old_description.as_ref(),
            TrackedField::Cost => self.old_cost.as_ref(),
            TrackedField::Status => self.old_status.as_ref(),
            TrackedField::LocationId => self.old_location_id.as_ref(),
            TrackedField::ResponsibleId => self.old_responsible_id.as_ref(),
        };
        value.filter(|v| v.is_defined())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_value_tolerates_mixed_wire_types() {
        let entry: ChangelogEntry = serde_json::from_str(
            r#"{
                "id": 1,
                "asset_id": 9,
                "user_id": 2,
                "change_type": "update",
                "createdAt": "2024-06-01T10:00:00Z",
                "old_cost": "500",
                "old_serial_number": 99120,
                "old_description": null
            }"#,
        )
        .unwrap();
        assert_eq!(entry.old_cost, Some(FieldValue::Text("500".into())));
        assert_eq!(entry.old_serial_number, Some(FieldValue::Int(99120)));
        assert_eq!(entry.shadow(TrackedField::Description), None);
    }

    #[test]
    fn coercion_matches_numeric_and_string_forms() {
        assert_eq!(FieldValue::Int(500).coerce(), "500");
        assert_eq!(FieldValue::Number(500.0).coerce(), "500");
        assert_eq!(FieldValue::Number(500.5).coerce(), "500.5");
        assert_eq!(FieldValue::Text("500".into()).coerce(), "500");
    }

    #[test]
    fn explicit_diff_values_keep_wire_names() {
        let change: FieldChange = serde_json::from_str(
            r#"{"field": "cost", "oldValue": 300, "newValue": "450"}"#,
        )
        .unwrap();
        assert_eq!(change.old_value, Some(FieldValue::Int(300)));
        assert_eq!(change.new_value, Some(FieldValue::Text("450".into())));
        let json = serde_json::to_value(&change).unwrap();
        assert!(json.get("oldValue").is_some());
    }
}
