//! Local storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage key of the watchlist; the file is `<data_dir>/<key>.json`.
fn default_watchlist_key() -> String {
    String::from("mm_watchlist")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Data directory. Empty means the platform data dir (`~/.local/share/marketmind`).
    #[serde(default)]
    pub data_dir: String,

    /// Storage key the watchlist is written under.
    #[serde(default = "default_watchlist_key")]
    pub watchlist_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            watchlist_key: default_watchlist_key(),
        }
    }
}

impl StorageConfig {
    /// Resolve the effective data directory.
    ///
    /// Returns `None` only when no directory is configured and the platform
    /// has no data directory (e.g. no `$HOME`).
    #[must_use]
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        if !self.data_dir.trim().is_empty() {
            return Some(PathBuf::from(self.data_dir.trim()));
        }
        dirs::data_dir().map(|dir| dir.join("marketmind"))
    }

    /// Full path of the watchlist file.
    #[must_use]
    pub fn watchlist_path(&self) -> Option<PathBuf> {
        self.resolved_data_dir()
            .map(|dir| dir.join(format!("{}.json", self.watchlist_key)))
    }

    /// Directory generated charts are written to.
    #[must_use]
    pub fn charts_dir(&self) -> Option<PathBuf> {
        self.resolved_data_dir().map(|dir| dir.join("charts"))
    }
}
