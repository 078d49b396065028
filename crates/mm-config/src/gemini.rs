//! Model API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default Gemini REST endpoint.
fn default_endpoint() -> String {
    String::from("https://generativelanguage.googleapis.com")
}

fn default_model() -> String {
    String::from("gemini-2.5-flash")
}

const fn default_temperature() -> f32 {
    0.4
}

const fn default_history_limit() -> usize {
    10
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_search_grounding() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key. Falls back to `GEMINI_API_KEY` / `API_KEY` when empty.
    #[serde(default)]
    pub api_key: String,

    /// Model name used in the `generateContent` path.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (no trailing path).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Attach the search-grounding tool to every request.
    #[serde(default = "default_search_grounding")]
    pub search_grounding: bool,

    /// Number of prior turns sent as context.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// HTTP timeout for one model call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            search_grounding: default_search_grounding(),
            history_limit: default_history_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Check if a credential is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Reject values the API would refuse.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an out-of-range temperature,
    /// a zero history limit, or an empty model name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "gemini.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gemini.history_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "gemini.model".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
