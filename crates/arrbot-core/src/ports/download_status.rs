//! Download status port: list the torrent client's transfers.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Transfer;

/// Errors from the download client.
#[derive(Debug, Error)]
pub enum DownloadStatusError {
    /// Login was refused.
    #[error("Authentication with the download client failed: {message}")]
    Authentication {
        /// Details from the client
        message: String,
    },

    /// Network failure, timeout or non-success status.
    #[error("Download client unavailable: {message}")]
    Unavailable {
        /// What went wrong
        message: String,
    },

    /// The transfer list could not be parsed.
    #[error("Invalid response from the download client: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },
}

/// A torrent client.
///
/// Implementations authenticate on every call; nothing is cached.
#[async_trait]
pub trait DownloadStatusPort: Send + Sync {
    /// Every transfer the client currently knows about.
    async fn list_transfers(&self) -> Result<Vec<Transfer>, DownloadStatusError>;
}
