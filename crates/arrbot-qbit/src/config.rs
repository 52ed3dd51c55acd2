//! qBittorrent client configuration.

use std::time::Duration;

use arrbot_core::DownloadClientSettings;

/// Configuration for the qBittorrent client.
#[derive(Debug, Clone)]
pub struct QbitClientConfig {
    /// Web UI base URL, e.g. `http://qbittorrent:8080`
    pub(crate) base_url: String,
    /// Login user; login is skipped without one
    pub(crate) username: Option<String>,
    /// Login password
    pub(crate) password: Option<String>,
    /// TCP connect timeout
    pub(crate) connect_timeout: Duration,
    /// Timeout for each whole request
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl QbitClientConfig {
    /// Create a configuration without credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(20),
            user_agent: concat!("arrbot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Configuration from validated runtime settings.
    pub fn from_settings(settings: &DownloadClientSettings) -> Self {
        let config = Self::new(&settings.base_url);
        match &settings.username {
            Some(username) => config.with_credentials(
                username,
                settings
                    .password
                    .as_ref()
                    .map_or("", |p| p.expose()),
            ),
            None => config,
        }
    }

    /// Log in with these credentials before each call.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the connect timeout. Defaults to 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-request timeout. Defaults to 20 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
