//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_show_ticker() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Show the macro ticker line in the session header.
    #[serde(default = "default_show_ticker")]
    pub show_ticker: bool,

    /// Open generated charts in the system viewer as soon as they arrive.
    #[serde(default)]
    pub auto_open_charts: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_ticker: default_show_ticker(),
            auto_open_charts: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.show_ticker);
        assert!(!config.auto_open_charts);
    }
}
