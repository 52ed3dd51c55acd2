//! Wire types for the Radarr / Sonarr v3 API.
//!
//! Lookup results are deliberately lenient: every field is optional so one
//! odd entry never fails a whole search.

use serde::{Deserialize, Serialize};

use crate::config::ArrFlavor;

/// One element of `GET /api/v3/{movie|series}/lookup`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupItem {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub tmdb_id: Option<i64>,
    pub tvdb_id: Option<i64>,
    pub overview: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub remote_poster: Option<String>,
    pub seasons: Option<serde_json::Value>,
}

/// Artwork attached to a lookup result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub cover_type: Option<String>,
    pub remote_url: Option<String>,
    pub url: Option<String>,
}

impl LookupItem {
    /// The id the create call needs for this flavour.
    pub const fn external_id(&self, flavor: ArrFlavor) -> Option<i64> {
        match flavor {
            ArrFlavor::Radarr => self.tmdb_id,
            ArrFlavor::Sonarr => self.tvdb_id,
        }
    }

    /// Release year; Radarr reports 0 for unknown.
    pub fn known_year(&self) -> Option<i32> {
        self.year.filter(|y| *y > 0)
    }

    /// Poster URL: the `poster` image (remote URL first), then `remotePoster`.
    pub fn poster_url(&self) -> Option<String> {
        self.images
            .iter()
            .filter(|image| {
                image
                    .cover_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("poster"))
            })
            .find_map(|image| {
                non_empty(image.remote_url.as_deref()).or_else(|| non_empty(image.url.as_deref()))
            })
            .or_else(|| non_empty(self.remote_poster.as_deref()))
            .map(str::to_string)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// One element of `GET /api/v3/rootfolder`.
#[derive(Debug, Clone, Deserialize)]
pub struct RootFolder {
    pub id: i64,
    pub path: String,
}

/// Body of `POST /api/v3/movie`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub title: String,
    pub tmdb_id: i64,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    pub add_options: AddMovieOptions,
}

/// `addOptions` for a movie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieOptions {
    pub search_for_movie: bool,
}

/// Body of `POST /api/v3/series`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSeriesRequest {
    pub title: String,
    pub tvdb_id: i64,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub seasons: serde_json::Value,
    pub monitored: bool,
    pub monitor: String,
    pub add_options: AddSeriesOptions,
}

/// `addOptions` for a series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSeriesOptions {
    pub search_for_missing_episodes: bool,
}
