//! Environment overrides, isolated with figment::Jail.

use figment::Jail;
use mm_config::MmConfig;

#[test]
fn prefixed_env_sets_api_key() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let home = jail.directory().to_string_lossy().into_owned();
        jail.set_env("XDG_CONFIG_HOME", &home);
        jail.set_env("MARKETMIND_GEMINI__API_KEY", "env-key");
        jail.set_env("MARKETMIND_GEMINI__HISTORY_LIMIT", "4");

        let config = MmConfig::load().expect("config loads");
        assert!(config.gemini.is_configured());
        assert_eq!(config.gemini.api_key, "env-key");
        assert_eq!(config.gemini.history_limit, 4);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let home = jail.directory().to_string_lossy().into_owned();
        jail.set_env("XDG_CONFIG_HOME", &home);
        jail.create_dir(".marketmind")?;
        jail.create_file(".marketmind/config.toml", "[gemini]\nmodel = \"from-toml\"\n")?;
        jail.set_env("MARKETMIND_GEMINI__MODEL", "from-env");

        let config = MmConfig::load().expect("config loads");
        assert_eq!(config.gemini.model, "from-env");
        Ok(())
    });
}

#[test]
fn generic_api_key_is_a_fallback_only() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let home = jail.directory().to_string_lossy().into_owned();
        jail.set_env("XDG_CONFIG_HOME", &home);
        jail.set_env("API_KEY", "generic");

        let config = MmConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "generic");

        jail.set_env("MARKETMIND_GEMINI__API_KEY", "prefixed");
        let config = MmConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "prefixed");
        Ok(())
    });
}

#[test]
fn missing_key_is_not_an_error_at_load_time() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let home = jail.directory().to_string_lossy().into_owned();
        jail.set_env("XDG_CONFIG_HOME", &home);
        let config = MmConfig::load().expect("config loads");
        assert!(!config.gemini.is_configured());
        Ok(())
    });
}
