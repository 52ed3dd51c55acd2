//! Catalog entries returned by the movie and series managers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which catalog a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Movies (Radarr).
    Movie,
    /// TV series (Sonarr).
    Series,
}

impl CatalogKind {
    /// Both kinds, in the order they are offered to the user.
    pub const ALL: [Self; 2] = [Self::Movie, Self::Series];

    /// Lowercase noun used in prompts ("movie", "series").
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Stable token used in callback payloads.
    pub const fn token(self) -> &'static str {
        self.noun()
    }

    /// Parse a callback token back into a kind.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A read-only view of one lookup result from a catalog backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display title.
    pub title: String,
    /// Release year, when the backend knows it.
    pub year: Option<i32>,
    /// TMDb id for movies, TVDB id for series.
    pub external_id: i64,
    /// Plot summary.
    pub overview: Option<String>,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Season structure for series; passed back verbatim when adding.
    pub seasons: Option<serde_json::Value>,
}

impl CatalogEntry {
    /// Create an entry with only the required fields set.
    pub fn new(title: impl Into<String>, external_id: i64) -> Self {
        Self {
            title: title.into(),
            year: None,
            external_id,
            overview: None,
            poster_url: None,
            seasons: None,
        }
    }

    /// Set the release year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the overview text.
    #[must_use]
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// Set the poster URL.
    #[must_use]
    pub fn with_poster_url(mut self, url: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self
    }

    /// Set the season structure.
    #[must_use]
    pub fn with_seasons(mut self, seasons: serde_json::Value) -> Self {
        self.seasons = Some(seasons);
        self
    }

    /// Button label: `Title (Year)` or just `Title`.
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_with_and_without_year() {
        let entry = CatalogEntry::new("Inception", 27205).with_year(2010);
        assert_eq!(entry.label(), "Inception (2010)");

        let entry = CatalogEntry::new("Untitled Project", 1);
        assert_eq!(entry.label(), "Untitled Project");
    }

    #[test]
    fn test_kind_tokens_roundtrip() {
        for kind in CatalogKind::ALL {
            assert_eq!(CatalogKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(CatalogKind::from_token("Movie"), None);
        assert_eq!(CatalogKind::from_token(""), None);
    }
}
