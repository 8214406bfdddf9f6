//! Integration tests for environment variable overrides.

use figment::Jail;
use inv_config::InvConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("INVENTRA_API__BASE_URL", "https://env.example.com");
        jail.set_env("INVENTRA_API__TIMEOUT_SECS", "5");

        let config = InvConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://env.example.com");
        assert_eq!(config.api.timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn general_section_maps_through_double_underscore() {
    Jail::expect_with(|jail| {
        jail.set_env("INVENTRA_GENERAL__DEFAULT_LIMIT", "50");

        let config = InvConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn unrelated_prefixed_vars_are_ignored() {
    Jail::expect_with(|jail| {
        // The token override and log filter share the prefix but are not
        // config keys.
        jail.set_env("INVENTRA_LOG", "inventra=debug");

        let config = InvConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://localhost:3000");
        Ok(())
    });
}
