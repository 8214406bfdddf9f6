//! `inva schema`: JSON Schema dumps for the wire types.

use std::collections::BTreeMap;

use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Schemas for the wire types, keyed by the name accepted on the command
/// line. A `BTreeMap` keeps listings sorted.
fn registry() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();
    schemas.insert("asset", schema_for!(inv_core::entities::Asset));
    schemas.insert("asset_detail", schema_for!(inv_core::entities::AssetDetail));
    schemas.insert("asset_filter", schema_for!(inv_core::filter::AssetFilter));
    schemas.insert("asset_page", schema_for!(inv_core::entities::AssetPage));
    schemas.insert("asset_stats", schema_for!(inv_core::entities::AssetStats));
    schemas.insert("asset_type", schema_for!(inv_core::entities::AssetType));
    schemas.insert(
        "capabilities",
        schema_for!(inv_core::capability::Capabilities),
    );
    schemas.insert(
        "changelog_entry",
        schema_for!(inv_core::entities::ChangelogEntry),
    );
    schemas.insert("field_change", schema_for!(inv_core::entities::FieldChange));
    schemas.insert("location", schema_for!(inv_core::entities::Location));
    schemas.insert(
        "session_identity",
        schema_for!(inv_core::identity::SessionIdentity),
    );
    schemas.insert("user", schema_for!(inv_core::entities::User));
    schemas
}

/// Print one schema, or the sorted name list when no name is given.
///
/// # Errors
///
/// Returns an error for an unknown type name.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schemas = registry();
    match args.type_name.as_deref() {
        Some(name) => {
            let schema = schemas.get(name).ok_or_else(|| {
                anyhow::anyhow!("unknown schema '{name}'; run `inva schema` to list names")
            })?;
            output(schema, flags.format)
        }
        None => {
            let names: Vec<&str> = schemas.keys().copied().collect();
            output(&names, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_has_the_expected_names() {
        let schemas = registry();
        // One entry per wire type the CLI can describe.
        assert_eq!(schemas.len(), 12);
        assert!(schemas.contains_key("asset"));
        assert!(schemas.contains_key("changelog_entry"));
        assert!(schemas.contains_key("capabilities"));
    }

    #[test]
    fn listing_is_sorted() {
        let names: Vec<&str> = registry().keys().copied().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_schema_serializes_to_an_object() {
        for (name, schema) in registry() {
            let value = serde_json::to_value(&schema).unwrap();
            assert!(value.is_object(), "schema '{name}' is not an object");
        }
    }
}
