//! Asset list filters with empty-sentinel normalization.
//!
//! A field at its sentinel ("" for text, 0 for numbers, no status) means "no
//! constraint" and is stripped from the outgoing query entirely, so the
//! server never has to distinguish "filter by zero" from "no filter".

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::AssetStatus;

/// Literal a status selector sends to mean "no constraint".
pub const STATUS_NO_FILTER: &str = "no_filter";

/// Errors from parsing textual filter assignments (`field=value`).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter field '{0}'")]
    UnknownField(String),
    #[error("invalid value '{value}' for filter field '{field}'")]
    InvalidValue { field: String, value: String },
}

/// The asset list's filter set. Every field defaults to its sentinel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssetFilter {
    pub name: String,
    pub serial_number: i64,
    pub type_id: i64,
    pub description: String,
    pub location_id: i64,
    pub status: Option<AssetStatus>,
    pub responsible_id: i64,
    pub cost: i64,
}

impl AssetFilter {
    /// True iff at least one field differs from its sentinel.
    #[must_use]
    pub fn has_active(&self) -> bool {
        *self != Self::default()
    }

    /// Reset every field to its sentinel in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Query pairs for the list endpoint, with sentinel fields stripped.
    /// An all-sentinel filter produces no pairs at all.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.name.is_empty() {
            pairs.push(("name", self.name.clone()));
        }
        if self.serial_number != 0 {
            pairs.push(("serial_number", self.serial_number.to_string()));
        }
        if self.type_id != 0 {
            pairs.push(("type_id", self.type_id.to_string()));
        }
        if !self.description.is_empty() {
            pairs.push(("description", self.description.clone()));
        }
        if self.location_id != 0 {
            pairs.push(("location_id", self.location_id.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if self.responsible_id != 0 {
            pairs.push(("responsible_id", self.responsible_id.to_string()));
        }
        if self.cost != 0 {
            pairs.push(("cost", self.cost.to_string()));
        }
        pairs
    }

    /// Assign one field from its textual form. An empty value, `0`, or the
    /// no-filter literal resets the field to its sentinel.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FilterError> {
        match field {
            "name" => self.name = value.to_owned(),
            "description" => self.description = value.to_owned(),
            "serial_number" => self.serial_number = parse_numeric(field, value)?,
            "type_id" => self.type_id = parse_numeric(field, value)?,
            "location_id" => self.location_id = parse_numeric(field, value)?,
            "responsible_id" => self.responsible_id = parse_numeric(field, value)?,
            "cost" => self.cost = parse_numeric(field, value)?,
            "status" => {
                if value.is_empty() || value == STATUS_NO_FILTER {
                    self.status = None;
                } else {
                    let status = AssetStatus::ALL
                        .into_iter()
                        .find(|s| s.as_str() == value)
                        .ok_or_else(|| FilterError::InvalidValue {
                            field: field.to_owned(),
                            value: value.to_owned(),
                        })?;
                    self.status = Some(status);
                }
            }
            other => return Err(FilterError::UnknownField(other.to_owned())),
        }
        Ok(())
    }
}

fn parse_numeric(field: &str, value: &str) -> Result<i64, FilterError> {
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| FilterError::InvalidValue {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn all_sentinel_filter_produces_empty_query() {
        let filter = AssetFilter::default();
        assert!(filter.to_query_pairs().is_empty());
        assert!(!filter.has_active());
    }

    #[rstest]
    #[case::empty_name("name", "")]
    #[case::zero_serial("serial_number", "0")]
    #[case::zero_type("type_id", "0")]
    #[case::empty_description("description", "")]
    #[case::zero_location("location_id", "0")]
    #[case::no_filter_status("status", "no_filter")]
    #[case::zero_responsible("responsible_id", "0")]
    #[case::zero_cost("cost", "0")]
    fn sentinel_values_are_stripped(#[case] field: &str, #[case] value: &str) {
        let mut filter = AssetFilter::default();
        filter.set(field, value).unwrap();
        assert!(filter.to_query_pairs().is_empty());
        assert!(!filter.has_active());
    }

    #[test]
    fn populated_fields_appear_in_declaration_order() {
        let mut filter = AssetFilter::default();
        filter.set("status", "active").unwrap();
        filter.set("name", "laptop").unwrap();
        filter.set("location_id", "3").unwrap();
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("name", "laptop".to_owned()),
                ("location_id", "3".to_owned()),
                ("status", "active".to_owned()),
            ]
        );
        assert!(filter.has_active());
    }

    #[test]
    fn mixed_sentinels_only_emit_active_fields() {
        let filter = AssetFilter {
            name: String::new(),
            serial_number: 99120,
            type_id: 0,
            description: String::new(),
            location_id: 0,
            status: None,
            responsible_id: 4,
            cost: 0,
        };
        assert_eq!(
            filter.to_query_pairs(),
            vec![
                ("serial_number", "99120".to_owned()),
                ("responsible_id", "4".to_owned()),
            ]
        );
    }

    #[test]
    fn clear_resets_every_field_in_one_step() {
        let mut filter = AssetFilter::default();
        filter.set("name", "desk").unwrap();
        filter.set("cost", "1200").unwrap();
        filter.set("status", "inactive").unwrap();
        filter.clear();
        assert_eq!(filter, AssetFilter::default());
    }

    #[test]
    fn setting_back_to_sentinel_deactivates_field() {
        let mut filter = AssetFilter::default();
        filter.set("serial_number", "42").unwrap();
        assert!(filter.has_active());
        filter.set("serial_number", "0").unwrap();
        assert!(!filter.has_active());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut filter = AssetFilter::default();
        assert_eq!(
            filter.set("color", "red"),
            Err(FilterError::UnknownField("color".into()))
        );
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let mut filter = AssetFilter::default();
        let err = filter.set("cost", "cheap").unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                field: "cost".into(),
                value: "cheap".into()
            }
        );
    }

    #[test]
    fn invalid_status_is_rejected() {
        let mut filter = AssetFilter::default();
        assert!(filter.set("status", "broken").is_err());
        filter.set("status", "decommissioned").unwrap();
        assert_eq!(filter.status, Some(AssetStatus::Decommissioned));
    }
}
