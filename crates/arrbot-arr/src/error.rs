//! Internal error types for Radarr / Sonarr operations.
//!
//! These errors are internal to `arrbot-arr` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for Radarr / Sonarr operations.
pub type ArrResult<T> = Result<T, ArrError>;

/// Errors related to Radarr / Sonarr API operations.
#[derive(Debug, Error)]
pub enum ArrError {
    /// API request failed with an HTTP error status.
    #[error("API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body, possibly truncated
        body: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The configured root folder id is not in the backend's list.
    #[error("Root folder id {id} not found (available: {available:?})")]
    RootFolderNotFound {
        /// Configured id
        id: i64,
        /// Ids the backend reported
        available: Vec<i64>,
    },

    /// The API key cannot be used as a header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

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
