//! Root folder resolution and the create call.

use arrbot_core::CatalogEntry;

use super::ArrClient;
use crate::config::ArrFlavor;
use crate::error::{ArrError, ArrResult};
use crate::http::HttpBackend;
use crate::models::{
    AddMovieOptions, AddMovieRequest, AddSeriesOptions, AddSeriesRequest, RootFolder,
};
use crate::url::build_api_url;

impl<B: HttpBackend> ArrClient<B> {
    /// Every root folder the backend knows about.
    pub(crate) async fn root_folders(&self) -> ArrResult<Vec<RootFolder>> {
        let url = build_api_url(&self.config.base_url, "rootfolder");
        self.backend.get_json(&url).await
    }

    /// Path of the configured root folder.
    pub(crate) async fn resolve_root_folder(&self) -> ArrResult<String> {
        let id = self.config.root_folder_id;
        let folders = self.root_folders().await?;
        folders
            .iter()
            .find(|folder| folder.id == id)
            .map(|folder| folder.path.clone())
            .ok_or_else(|| ArrError::RootFolderNotFound {
                id,
                available: folders.iter().map(|f| f.id).collect(),
            })
    }

    /// Create request body for `entry` under `root_folder_path`.
    pub(crate) fn create_body(
        &self,
        entry: &CatalogEntry,
        root_folder_path: String,
    ) -> ArrResult<serde_json::Value> {
        let body = match self.config.flavor {
            ArrFlavor::Radarr => serde_json::to_value(AddMovieRequest {
                title: entry.title.clone(),
                tmdb_id: entry.external_id,
                quality_profile_id: self.config.quality_profile_id,
                root_folder_path,
                monitored: true,
                add_options: AddMovieOptions {
                    search_for_movie: true,
                },
            })?,
            ArrFlavor::Sonarr => serde_json::to_value(AddSeriesRequest {
                title: entry.title.clone(),
                tvdb_id: entry.external_id,
                quality_profile_id: self.config.quality_profile_id,
                root_folder_path,
                seasons: entry
                    .seasons
                    .clone()
                    .unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
                monitored: true,
                monitor: "all".to_string(),
                add_options: AddSeriesOptions {
                    search_for_missing_episodes: true,
                },
            })?,
        };
        Ok(body)
    }

    /// POST the create request.
    pub(crate) async fn create(
        &self,
        entry: &CatalogEntry,
        root_folder_path: String,
    ) -> ArrResult<()> {
        let url = build_api_url(&self.config.base_url, self.config.flavor.resource());
        let body = self.create_body(entry, root_folder_path)?;
        self.backend.post_json(&url, &body).await
    }
}
