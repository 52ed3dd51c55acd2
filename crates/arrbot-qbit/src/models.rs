//! Wire models for the qBittorrent Web API.

use serde::Deserialize;

/// One entry of `GET /api/v2/torrents/info`.
///
/// Only the fields the bot shows are read; the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentInfo {
    #[serde(default)]
    pub name: String,
    /// 0.0 to 1.0
    #[serde(default)]
    pub progress: f64,
    /// Selected size in bytes
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub state: String,
}

/// Raw reply to a Web UI call.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Every `Set-Cookie` header value
    pub set_cookies: Vec<String>,
}

impl RawResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
