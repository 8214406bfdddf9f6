//! Inventory backend endpoint configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:3000".to_owned()
}

/// Matches the backend's request timeout expectation (10s).
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the inventory backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Join a resource path onto the base URL, tolerating stray slashes on
    /// either side.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let config = ApiConfig {
            base_url: "https://inventory.example.com/".into(),
            timeout_secs: 10,
        };
        assert_eq!(
            config.endpoint("/assets/stats"),
            "https://inventory.example.com/assets/stats"
        );
        assert_eq!(
            config.endpoint("auth/login"),
            "https://inventory.example.com/auth/login"
        );
    }
}
