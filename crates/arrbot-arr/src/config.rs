//! Public configuration for the Radarr / Sonarr client.

use std::time::Duration;

use arrbot_core::CatalogKind;
use arrbot_core::settings::{CatalogSettings, DEFAULT_QUALITY_PROFILE_ID, DEFAULT_ROOT_FOLDER_ID};

/// Which manager the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrFlavor {
    /// Radarr, for movies.
    Radarr,
    /// Sonarr, for series.
    Sonarr,
}

impl ArrFlavor {
    /// Display name used in messages and logs.
    pub const fn service_name(self) -> &'static str {
        match self {
            Self::Radarr => "Radarr",
            Self::Sonarr => "Sonarr",
        }
    }

    /// Catalog kind this manager serves.
    pub const fn kind(self) -> CatalogKind {
        match self {
            Self::Radarr => CatalogKind::Movie,
            Self::Sonarr => CatalogKind::Series,
        }
    }

    /// API resource name (`movie` / `series`).
    pub(crate) const fn resource(self) -> &'static str {
        match self {
            Self::Radarr => "movie",
            Self::Sonarr => "series",
        }
    }
}

/// Configuration for a Radarr or Sonarr client.
///
/// # Example
///
/// ```
/// use arrbot_arr::ArrClientConfig;
/// use std::time::Duration;
///
/// let config = ArrClientConfig::radarr("http://radarr:7878", "secret")
///     .with_root_folder_id(2)
///     .with_read_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ArrClientConfig {
    /// Which manager this is
    pub(crate) flavor: ArrFlavor,
    /// Base URL, e.g. `http://radarr:7878`
    pub(crate) base_url: String,
    /// `X-Api-Key` header value
    pub(crate) api_key: String,
    /// Root folder id resolved to a path when adding
    pub(crate) root_folder_id: i64,
    /// Quality profile id sent when adding
    pub(crate) quality_profile_id: i64,
    /// Timeout for lookups and root folder reads
    pub(crate) read_timeout: Duration,
    /// Timeout for the create call
    pub(crate) write_timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl ArrClientConfig {
    /// Create a configuration with default ids and timeouts.
    pub fn new(flavor: ArrFlavor, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            flavor,
            base_url: base_url.into(),
            api_key: api_key.into(),
            root_folder_id: DEFAULT_ROOT_FOLDER_ID,
            quality_profile_id: DEFAULT_QUALITY_PROFILE_ID,
            read_timeout: Duration::from_secs(15),
            write_timeout: Duration::from_secs(20),
            user_agent: concat!("arrbot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Radarr configuration.
    pub fn radarr(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(ArrFlavor::Radarr, base_url, api_key)
    }

    /// Sonarr configuration.
    pub fn sonarr(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(ArrFlavor::Sonarr, base_url, api_key)
    }

    /// Configuration from validated runtime settings.
    pub fn from_settings(flavor: ArrFlavor, settings: &CatalogSettings) -> Self {
        Self::new(flavor, &settings.base_url, settings.api_key.expose())
            .with_root_folder_id(settings.root_folder_id)
            .with_quality_profile_id(settings.quality_profile_id)
    }

    /// Set the root folder id. Defaults to 1.
    #[must_use]
    pub const fn with_root_folder_id(mut self, id: i64) -> Self {
        self.root_folder_id = id;
        self
    }

    /// Set the quality profile id. Defaults to 1.
    #[must_use]
    pub const fn with_quality_profile_id(mut self, id: i64) -> Self {
        self.quality_profile_id = id;
        self
    }

    /// Set the timeout for read calls. Defaults to 15 seconds.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the timeout for the create call. Defaults to 20 seconds.
    #[must_use]
    pub const fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
