use anyhow::Context;
use mm_config::MmConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration, then apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<MmConfig> {
    load_dotenv()?;

    let mut config = MmConfig::load().context("failed to load configuration")?;
    if let Some(dir) = &flags.data_dir {
        config.storage.data_dir.clone_from(dir);
    }

    tracing::debug!(
        model = %config.gemini.model,
        configured = config.gemini.is_configured(),
        grounding = config.gemini.search_grounding,
        "configuration loaded"
    );
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env"),
    }
}
