//! Parsing helpers for enum-valued flags.

use serde::de::DeserializeOwned;

/// Parse a flag value into a serde-deserializable enum, so the accepted
/// names always match the wire names. Hyphens are accepted in place of
/// underscores and case is ignored.
///
/// # Errors
///
/// Returns an error naming the flag and the rejected value; the serde
/// message lists the accepted names.
pub fn parse_enum<T: DeserializeOwned>(raw: &str, field: &str) -> anyhow::Result<T> {
    let normalized = raw.trim().to_lowercase().replace('-', "_");
    serde_json::from_str(&format!("\"{normalized}\""))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use inv_core::enums::{AssetStatus, Role};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_status_names() {
        let status: AssetStatus = parse_enum("active", "status").unwrap();
        assert_eq!(status, AssetStatus::Active);
        let status: AssetStatus = parse_enum("DECOMMISSIONED", "status").unwrap();
        assert_eq!(status, AssetStatus::Decommissioned);
    }

    #[test]
    fn parses_role_names() {
        let role: Role = parse_enum("admin", "role").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn rejects_unknown_values_with_the_flag_name() {
        let error = parse_enum::<AssetStatus>("broken", "status").unwrap_err();
        assert!(error.to_string().contains("invalid status 'broken'"));
    }
}
