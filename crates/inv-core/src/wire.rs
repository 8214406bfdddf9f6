//! Wire-level error payload normalization.
//!
//! Error responses expose either a structured `{"message": ...}` or a
//! validation shape `{"errors": [{"msg": ...}]}`. Every surfaced error uses
//! the same fallback chain: message, first validation msg, generic unknown.

/// Fallback when a response body carries no usable error message.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Extract the user-facing message from an error body, if it has one.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_owned());
    }
    value
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("msg"))
        .and_then(|msg| msg.as_str())
        .map(ToOwned::to_owned)
}

/// The full fallback chain: structured message, first validation error,
/// generic unknown-error string.
#[must_use]
pub fn normalize_error_message(body: &str) -> String {
    error_message(body).unwrap_or_else(|| UNKNOWN_ERROR.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn structured_message_wins() {
        let body = r#"{"message": "Credenciales inválidas", "errors": [{"msg": "other"}]}"#;
        assert_eq!(normalize_error_message(body), "Credenciales inválidas");
    }

    #[test]
    fn first_validation_error_is_the_fallback() {
        let body = r#"{"errors": [{"msg": "serial_number must be numeric"}, {"msg": "later"}]}"#;
        assert_eq!(
            normalize_error_message(body),
            "serial_number must be numeric"
        );
    }

    #[test]
    fn garbage_bodies_fall_back_to_unknown() {
        assert_eq!(normalize_error_message("<html>502</html>"), UNKNOWN_ERROR);
        assert_eq!(normalize_error_message(""), UNKNOWN_ERROR);
        assert_eq!(normalize_error_message(r#"{"errors": []}"#), UNKNOWN_ERROR);
    }
}
