//! Radarr / Sonarr client.
//!
//! Generic over the HTTP backend so the request flow can be tested against
//! canned responses.

mod add;
mod lookup;

use url::Url;

use crate::config::{ArrClientConfig, ArrFlavor};
use crate::error::ArrResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::parse_base_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultArrClient = ArrClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Settings the client needs after construction.
#[derive(Debug, Clone)]
pub(crate) struct ArrConfig {
    pub flavor: ArrFlavor,
    pub base_url: Url,
    pub root_folder_id: i64,
    pub quality_profile_id: i64,
}

/// Client for one Radarr or Sonarr instance.
///
/// Use `DefaultArrClient` for production code and interact with it through
/// the `CatalogPort` trait.
pub struct ArrClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ArrConfig,
}

impl DefaultArrClient {
    /// Create a client; fails on an unparsable base URL or API key.
    pub fn new(config: &ArrClientConfig) -> ArrResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            config: Self::to_internal_config(config)?,
        })
    }
}

impl<B: HttpBackend> ArrClient<B> {
    fn to_internal_config(config: &ArrClientConfig) -> ArrResult<ArrConfig> {
        Ok(ArrConfig {
            flavor: config.flavor,
            base_url: parse_base_url(&config.base_url)?,
            root_folder_id: config.root_folder_id,
            quality_profile_id: config.quality_profile_id,
        })
    }

    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: &ArrClientConfig, backend: B) -> ArrResult<Self> {
        Ok(Self {
            backend,
            config: Self::to_internal_config(config)?,
        })
    }

    /// Which manager this client talks to.
    pub const fn flavor(&self) -> ArrFlavor {
        self.config.flavor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArrError;
    use crate::http::testing::FakeBackend;

    #[test]
    fn test_default_client_creation() {
        let config = ArrClientConfig::radarr("http://radarr:7878", "key");
        let client = DefaultArrClient::new(&config).unwrap();
        assert_eq!(client.flavor(), ArrFlavor::Radarr);
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let config = ArrClientConfig::sonarr("sonarr without scheme", "key");
        let result = ArrClient::with_backend(&config, FakeBackend::new());
        assert!(matches!(result, Err(ArrError::InvalidUrl(_))));
    }
}
