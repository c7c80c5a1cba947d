//! AI client error types.

use thiserror::Error;

/// Errors that can occur when talking to the generative-language API.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response parsed but carried no usable text or vector.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// No API key is configured.
    #[error("Gemini is not configured, set SOPHIA_GEMINI__API_KEY or GEMINI_API_KEY")]
    NotConfigured,
}
