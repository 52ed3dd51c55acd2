//! Port trait implementation for `QbitClient`.

use async_trait::async_trait;
use arrbot_core::{DownloadStatusError, DownloadStatusPort, Transfer};

use crate::client::QbitClient;
use crate::error::QbitError;
use crate::http::WebUiBackend;
use crate::models::TorrentInfo;

// ============================================================================
// Error Mapping
// ============================================================================

fn map_error(err: QbitError) -> DownloadStatusError {
    match err {
        QbitError::Auth(message) => DownloadStatusError::Authentication { message },
        QbitError::Api { status, url, body } => DownloadStatusError::Unavailable {
            message: format!("HTTP {status} from {url}: {body}"),
        },
        QbitError::Network(e) => DownloadStatusError::Unavailable {
            message: e.to_string(),
        },
        QbitError::InvalidUrl(e) => DownloadStatusError::Unavailable {
            message: format!("invalid URL: {e}"),
        },
        QbitError::JsonParse(e) => DownloadStatusError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

fn to_transfer(torrent: TorrentInfo) -> Transfer {
    Transfer {
        name: torrent.name,
        progress: torrent.progress,
        size_bytes: u64::try_from(torrent.size).unwrap_or(0),
        state: torrent.state,
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: WebUiBackend + 'static> DownloadStatusPort for QbitClient<B> {
    async fn list_transfers(&self) -> Result<Vec<Transfer>, DownloadStatusError> {
        match self.fetch_torrents().await {
            Ok(torrents) => {
                tracing::debug!(count = torrents.len(), "Fetched qBittorrent transfers");
                Ok(torrents.into_iter().map(to_transfer).collect())
            }
            Err(e) => {
                tracing::error!(
                    url = %self.base_url,
                    error = %e,
                    "Could not list qBittorrent transfers"
                );
                Err(map_error(e))
            }
        }
    }
}
