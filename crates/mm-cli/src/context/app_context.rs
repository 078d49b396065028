use std::path::PathBuf;

use anyhow::Context;
use mm_chat::Conversation;
use mm_config::MmConfig;
use mm_gateway::GeminiGateway;
use mm_store::{JsonFileStore, MemoryStore, WatchlistStore};

use crate::cli::GlobalFlags;

/// Watchlist backend chosen at startup.
pub type DynStore = Box<dyn WatchlistStore>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: MmConfig,
    pub gateway: GeminiGateway,
    pub conversation: Conversation<DynStore>,
    /// Where chart markup is written for viewing; `None` when no data
    /// directory could be resolved.
    pub charts_dir: Option<PathBuf>,
}

impl AppContext {
    pub fn init(config: MmConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let store: DynStore = if flags.ephemeral {
            tracing::debug!("using in-memory watchlist");
            Box::new(MemoryStore::new())
        } else {
            let path = config
                .storage
                .watchlist_path()
                .context("no data directory available; pass --data-dir or --ephemeral")?;
            tracing::debug!(path = %path.display(), "using watchlist file");
            Box::new(JsonFileStore::new(path))
        };

        let gateway =
            GeminiGateway::new(&config.gemini).context("failed to build Gemini HTTP client")?;
        let conversation = Conversation::new(store).with_history_limit(config.gemini.history_limit);
        let charts_dir = config.storage.charts_dir();

        Ok(Self {
            config,
            gateway,
            conversation,
            charts_dir,
        })
    }
}
