//! Shared HTTP response checking.
//!
//! Centralizes the non-success path so individual clients stay focused on
//! request construction and response mapping. Error bodies are normalized
//! through the shared fallback chain before they leave this layer.

use inv_core::wire::normalize_error_message;

use crate::error::ApiError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success. Any non-success status becomes
/// [`ApiError::Api`] carrying the body's message after the fallback chain
/// (structured `message`, first validation `errors[].msg`, generic unknown).
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = normalize_error_message(&body);
        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_owned())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = mock_response(200, r#"{"assets": []}"#);
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn structured_message_is_surfaced() {
        let resp = mock_response(409, r#"{"message": "Ya existe un activo con ese serial"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Ya existe un activo con ese serial");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn validation_errors_fall_back_to_first_msg() {
        let resp = mock_response(422, r#"{"errors": [{"msg": "name is required"}]}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            ApiError::Api { message, .. } => assert_eq!(message, "name is required"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_bodies_become_unknown_error() {
        let resp = mock_response(502, "<html>Bad Gateway</html>");
        let err = check_response(resp).await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, inv_core::wire::UNKNOWN_ERROR);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
