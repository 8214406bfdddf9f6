//! Integration test for `.env` file loading.

use figment::Jail;
use inv_config::InvConfig;

#[test]
fn dotenv_file_feeds_env_layer() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "INVENTRA_API__TIMEOUT_SECS=45\n")?;

        let config = InvConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.api.timeout_secs, 45);
        Ok(())
    });
}
