//! Port trait implementation for `ArrClient`.
//!
//! Implements the core-owned `CatalogPort` trait, converting lookup items to
//! core DTOs and internal errors to `CatalogError`.

use async_trait::async_trait;
use arrbot_core::{CatalogEntry, CatalogError, CatalogKind, CatalogPort, CatalogResult};

use crate::client::ArrClient;
use crate::config::ArrFlavor;
use crate::error::ArrError;
use crate::http::HttpBackend;
use crate::models::LookupItem;

// ============================================================================
// Error Mapping
// ============================================================================

/// Map an error from a read call (lookup).
fn map_read_error(service: &str, err: ArrError) -> CatalogError {
    match err {
        ArrError::ApiRequestFailed { status, url, body } => CatalogError::Unavailable {
            service: service.to_string(),
            message: format!("HTTP {status} from {url}: {body}"),
        },
        ArrError::Network(e) => CatalogError::Unavailable {
            service: service.to_string(),
            message: e.to_string(),
        },
        ArrError::InvalidResponse { message } => CatalogError::InvalidResponse {
            service: service.to_string(),
            message,
        },
        ArrError::JsonParse(e) => CatalogError::InvalidResponse {
            service: service.to_string(),
            message: e.to_string(),
        },
        ArrError::RootFolderNotFound { .. } | ArrError::InvalidApiKey | ArrError::InvalidUrl(_) => {
            CatalogError::Configuration {
                message: err.to_string(),
            }
        }
    }
}

/// Map an error from the create call.
fn map_write_error(service: &str, err: ArrError) -> CatalogError {
    match err {
        ArrError::ApiRequestFailed { status, body, .. } => CatalogError::Rejected {
            service: service.to_string(),
            status,
            body,
        },
        other => map_read_error(service, other),
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Convert a lookup item to a core entry; items that cannot be added are dropped.
fn to_catalog_entry(item: LookupItem, flavor: ArrFlavor) -> Option<CatalogEntry> {
    let external_id = item.external_id(flavor)?;
    let title = item.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    Some(CatalogEntry {
        title: title.to_string(),
        year: item.known_year(),
        external_id,
        overview: item.overview.clone().filter(|o| !o.trim().is_empty()),
        poster_url: item.poster_url(),
        seasons: match flavor {
            ArrFlavor::Radarr => None,
            ArrFlavor::Sonarr => item.seasons,
        },
    })
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + 'static> CatalogPort for ArrClient<B> {
    fn kind(&self) -> CatalogKind {
        self.config.flavor.kind()
    }

    fn service_name(&self) -> &str {
        self.config.flavor.service_name()
    }

    async fn search(&self, term: &str) -> CatalogResult<Vec<CatalogEntry>> {
        let flavor = self.config.flavor;
        let items = self
            .lookup(term)
            .await
            .map_err(|e| map_read_error(flavor.service_name(), e))?;

        let total = items.len();
        let entries: Vec<CatalogEntry> = items
            .into_iter()
            .filter_map(|item| to_catalog_entry(item, flavor))
            .collect();
        if entries.len() < total {
            tracing::debug!(
                service = flavor.service_name(),
                dropped = total - entries.len(),
                "Dropped lookup results without title or id"
            );
        }
        Ok(entries)
    }

    async fn add(&self, entry: &CatalogEntry) -> CatalogResult<()> {
        let service = self.config.flavor.service_name();

        let root_folder_path = self.resolve_root_folder().await.map_err(|e| {
            tracing::error!(
                service,
                root_folder_id = self.config.root_folder_id,
                error = %e,
                "Could not resolve root folder"
            );
            CatalogError::Configuration {
                message: format!(
                    "could not resolve {service} root folder {}: {e}",
                    self.config.root_folder_id
                ),
            }
        })?;

        self.create(entry, root_folder_path).await.map_err(|e| {
            if let ArrError::ApiRequestFailed { status, url, body } = &e {
                tracing::error!(
                    service,
                    status,
                    url = %url,
                    body = %body,
                    title = %entry.title,
                    "Create request rejected"
                );
            } else {
                tracing::error!(service, error = %e, title = %entry.title, "Create request failed");
            }
            map_write_error(service, e)
        })
    }
}
