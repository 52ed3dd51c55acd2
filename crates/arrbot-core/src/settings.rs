//! Immutable runtime settings.
//!
//! Built once at startup by the binary, validated, then shared behind an
//! `Arc`. Nothing reads the environment after this point.

use std::fmt;
use std::time::Duration;

use crate::access::AllowList;

/// Default root folder id for both catalog backends.
pub const DEFAULT_ROOT_FOLDER_ID: i64 = 1;

/// Default quality profile id for both catalog backends.
pub const DEFAULT_QUALITY_PROFILE_ID: i64 = 1;

/// Default interval between VPN health checks.
pub const DEFAULT_VPN_CHECK_INTERVAL: Duration = Duration::from_secs(600);

/// Shortest VPN check interval we accept.
pub const MIN_VPN_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Country the VPN egress is expected in unless configured otherwise.
pub const DEFAULT_EXPECTED_COUNTRY: &str = "Netherlands";

/// A credential that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Connection settings for Radarr or Sonarr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Base URL, e.g. `http://radarr:7878`.
    pub base_url: String,
    /// `X-Api-Key` value.
    pub api_key: Secret,
    /// Root folder id resolved to a path when adding.
    pub root_folder_id: i64,
    /// Quality profile id sent when adding.
    pub quality_profile_id: i64,
}

/// Connection settings for qBittorrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadClientSettings {
    /// Web UI base URL.
    pub base_url: String,
    /// Login user; no login is attempted without it.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<Secret>,
}

/// Settings for the optional Gluetun public-IP check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnCheckSettings {
    /// Full URL of the public IP endpoint.
    pub url: String,
    /// Basic auth user.
    pub username: String,
    /// Basic auth password.
    pub password: Secret,
    /// Country the egress IP must be in.
    pub expected_country: String,
    /// Time between periodic checks.
    pub interval: Duration,
}

/// Everything the bot needs to run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Telegram bot token.
    pub telegram_token: Secret,
    /// Radarr connection.
    pub movies: CatalogSettings,
    /// Sonarr connection.
    pub series: CatalogSettings,
    /// qBittorrent connection.
    pub downloads: DownloadClientSettings,
    /// Who may use the bot.
    pub allow_list: AllowList,
    /// VPN check, when enabled and fully configured.
    pub vpn_check: Option<VpnCheckSettings>,
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must be a positive id, got {value}")]
    InvalidId { field: &'static str, value: i64 },

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("VPN check interval must be at least {min}s, got {got}s")]
    IntervalTooShort { min: u64, got: u64 },
}

fn check_url(field: &'static str, value: &str) -> Result<(), SettingsError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(SettingsError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

/// Environment variable names for one catalog backend, used in errors.
struct CatalogFields {
    url: &'static str,
    api_key: &'static str,
    root_folder_id: &'static str,
    quality_profile_id: &'static str,
}

const RADARR_FIELDS: CatalogFields = CatalogFields {
    url: "RADARR_URL",
    api_key: "RADARR_API_KEY",
    root_folder_id: "RADARR_ROOT_FOLDER_ID",
    quality_profile_id: "RADARR_QUALITY_PROFILE_ID",
};

const SONARR_FIELDS: CatalogFields = CatalogFields {
    url: "SONARR_URL",
    api_key: "SONARR_API_KEY",
    root_folder_id: "SONARR_ROOT_FOLDER_ID",
    quality_profile_id: "SONARR_QUALITY_PROFILE_ID",
};

fn check_catalog(fields: &CatalogFields, catalog: &CatalogSettings) -> Result<(), SettingsError> {
    check_url(fields.url, &catalog.base_url)?;
    if catalog.api_key.expose().trim().is_empty() {
        return Err(SettingsError::Empty(fields.api_key));
    }
    if catalog.root_folder_id <= 0 {
        return Err(SettingsError::InvalidId {
            field: fields.root_folder_id,
            value: catalog.root_folder_id,
        });
    }
    if catalog.quality_profile_id <= 0 {
        return Err(SettingsError::InvalidId {
            field: fields.quality_profile_id,
            value: catalog.quality_profile_id,
        });
    }
    Ok(())
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.telegram_token.expose().trim().is_empty() {
        return Err(SettingsError::Empty("TELEGRAM_BOT_TOKEN"));
    }

    check_catalog(&RADARR_FIELDS, &settings.movies)?;
    check_catalog(&SONARR_FIELDS, &settings.series)?;
    check_url("QBITTORRENT_URL", &settings.downloads.base_url)?;

    if let Some(vpn) = &settings.vpn_check {
        check_url("GLUETUN_URL", &vpn.url)?;
        if vpn.interval < MIN_VPN_CHECK_INTERVAL {
            return Err(SettingsError::IntervalTooShort {
                min: MIN_VPN_CHECK_INTERVAL.as_secs(),
                got: vpn.interval.as_secs(),
            });
        }
    }

    Ok(())
}
