use mm_config::MmConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &MmConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &MmConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gemini.is_configured() && has_single_underscore_key(&env_keys, "MARKETMIND_GEMINI") {
        warnings.push(
            "Gemini API key is empty while MARKETMIND_GEMINI_* env vars exist. Use double underscores (example: MARKETMIND_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if config.storage.data_dir.is_empty() && has_single_underscore_key(&env_keys, "MARKETMIND_STORAGE")
    {
        warnings.push(
            "Storage config appears default while MARKETMIND_STORAGE_* env vars exist. Use double underscores (example: MARKETMIND_STORAGE__DATA_DIR)."
                .to_string(),
        );
    }

    warnings
}

/// `PREFIX_X` present but no `PREFIX__X`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    let nested = format!("{prefix}__");
    let flat = format!("{prefix}_");
    keys.iter()
        .any(|key| key.starts_with(&flat) && !key.starts_with(&nested))
}
