//! Gateway error types.

use thiserror::Error;

/// Errors that can occur while asking the model for an answer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API key was configured.
    #[error("Gemini API key not configured; set MARKETMIND_GEMINI__API_KEY or GEMINI_API_KEY")]
    NotConfigured,

    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}
