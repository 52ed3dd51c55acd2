//! Catalog port: search and add against a movie or series manager.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CatalogEntry, CatalogKind};

/// Errors from catalog operations.
///
/// "No matches" is not an error: `search` returns `Ok(vec![])` for it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure, timeout or non-success status on a read.
    #[error("{service} unavailable: {message}")]
    Unavailable {
        /// Backend display name
        service: String,
        /// What went wrong
        message: String,
    },

    /// The backend answered with something we could not parse.
    #[error("Invalid response from {service}: {message}")]
    InvalidResponse {
        /// Backend display name
        service: String,
        /// What was invalid
        message: String,
    },

    /// The configured root folder could not be resolved.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },

    /// The create call was refused.
    #[error("{service} rejected the request (HTTP {status}): {body}")]
    Rejected {
        /// Backend display name
        service: String,
        /// HTTP status code
        status: u16,
        /// Response body, for diagnosis
        body: String,
    },
}

impl CatalogError {
    /// True for errors that mean the backend could not be reached or read.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::InvalidResponse { .. })
    }
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A movie or series manager.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Which kind of media this backend manages.
    fn kind(&self) -> CatalogKind;

    /// Human-readable backend name ("Radarr", "Sonarr").
    fn service_name(&self) -> &str;

    /// Look up entries matching a free-text term, in backend order.
    async fn search(&self, term: &str) -> CatalogResult<Vec<CatalogEntry>>;

    /// Add an entry to the library and start searching for it.
    ///
    /// Two calls submit two create requests; the backend deduplicates.
    async fn add(&self, entry: &CatalogEntry) -> CatalogResult<()>;
}

/// The pair of catalog backends, selected by [`CatalogKind`].
#[derive(Clone)]
pub struct Catalogs {
    movies: Arc<dyn CatalogPort>,
    series: Arc<dyn CatalogPort>,
}

impl Catalogs {
    /// Bundle the two backends; each must manage the kind it is wired for.
    pub fn new(movies: Arc<dyn CatalogPort>, series: Arc<dyn CatalogPort>) -> CatalogResult<Self> {
        for (port, kind) in [(&movies, CatalogKind::Movie), (&series, CatalogKind::Series)] {
            if port.kind() != kind {
                return Err(CatalogError::Configuration {
                    message: format!(
                        "{} manages {} entries but is wired for {kind}",
                        port.service_name(),
                        port.kind()
                    ),
                });
            }
        }
        Ok(Self { movies, series })
    }

    /// Backend for the given kind.
    pub fn get(&self, kind: CatalogKind) -> &dyn CatalogPort {
        match kind {
            CatalogKind::Movie => self.movies.as_ref(),
            CatalogKind::Series => self.series.as_ref(),
        }
    }
}

impl std::fmt::Debug for Catalogs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalogs")
            .field("movies", &self.movies.service_name())
            .field("series", &self.series.service_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::Rejected {
            service: "Radarr".to_string(),
            status: 400,
            body: "already exists".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Radarr"));
        assert!(text.contains("400"));
        assert!(text.contains("already exists"));
    }

    struct Named(CatalogKind);

    #[async_trait]
    impl CatalogPort for Named {
        fn kind(&self) -> CatalogKind {
            self.0
        }

        fn service_name(&self) -> &str {
            "Sonarr"
        }

        async fn search(&self, _term: &str) -> CatalogResult<Vec<CatalogEntry>> {
            Ok(Vec::new())
        }

        async fn add(&self, _entry: &CatalogEntry) -> CatalogResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_catalogs_route_by_kind() {
        let catalogs = Catalogs::new(
            Arc::new(Named(CatalogKind::Movie)),
            Arc::new(Named(CatalogKind::Series)),
        )
        .unwrap();
        assert_eq!(catalogs.get(CatalogKind::Movie).kind(), CatalogKind::Movie);
        assert_eq!(catalogs.get(CatalogKind::Series).kind(), CatalogKind::Series);
    }

    #[test]
    fn test_catalogs_reject_swapped_backends() {
        let err = Catalogs::new(
            Arc::new(Named(CatalogKind::Series)),
            Arc::new(Named(CatalogKind::Series)),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Configuration { .. }));
        assert!(err.to_string().contains("wired for movie"));
    }

    #[test]
    fn test_unavailable_classification() {
        let err = CatalogError::Unavailable {
            service: "Sonarr".to_string(),
            message: "timed out".to_string(),
        };
        assert!(err.is_unavailable());

        let err = CatalogError::Configuration {
            message: "root folder 5 not found".to_string(),
        };
        assert!(!err.is_unavailable());
    }
}
