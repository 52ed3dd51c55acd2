//! Internal error types for qBittorrent operations.
//!
//! Mapped to `DownloadStatusError` at the port boundary.

use thiserror::Error;

/// Result type alias for qBittorrent operations.
pub type QbitResult<T> = Result<T, QbitError>;

/// Errors related to the qBittorrent Web API.
#[derive(Debug, Error)]
pub enum QbitError {
    /// Login was refused.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Request failed with an HTTP error status.
    #[error("API request failed with status {status}: {url}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body
        body: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
