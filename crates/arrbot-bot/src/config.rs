//! Environment configuration.
//!
//! [`from_lookup`] turns a variable lookup into validated [`Settings`] and
//! reports every problem at once instead of stopping at the first. The
//! lookup is a plain function so tests never touch the process environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arrbot_core::settings::{
    DEFAULT_EXPECTED_COUNTRY, DEFAULT_QUALITY_PROFILE_ID, DEFAULT_ROOT_FOLDER_ID,
    DEFAULT_VPN_CHECK_INTERVAL,
};
use arrbot_core::{
    AllowList, CatalogSettings, DownloadClientSettings, Secret, Settings, SettingsError,
    VpnCheckSettings, validate_settings,
};
use thiserror::Error;

use crate::error::BotError;

/// Gluetun public IP endpoint used when `GLUETUN_URL` is unset.
pub const DEFAULT_GLUETUN_URL: &str = "http://localhost:8000/v1/publicip/ip";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,teloxide=warn";

/// One configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} is required but not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("{var} is invalid: {reason}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Values parsed but do not make sense together.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The env file could not be read.
    #[error("cannot read env file {path}: {reason}")]
    EnvFile {
        /// File that was requested
        path: PathBuf,
        /// Loader error
        reason: String,
    },
}

/// Every problem found in one pass over the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl std::error::Error for ConfigErrors {}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", problems.join("; "))
    }
}

impl ConfigErrors {
    /// The individual problems.
    pub fn problems(&self) -> &[ConfigError] {
        &self.0
    }
}

/// Collects values and problems while reading variables.
struct EnvReader<F> {
    lookup: F,
    problems: Vec<ConfigError>,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    const fn new(lookup: F) -> Self {
        Self {
            lookup,
            problems: Vec::new(),
        }
    }

    /// Trimmed value; empty counts as unset.
    fn optional(&self, var: &str) -> Option<String> {
        (self.lookup)(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&mut self, var: &'static str) -> String {
        self.optional(var).unwrap_or_else(|| {
            self.problems.push(ConfigError::Missing(var));
            String::new()
        })
    }

    fn id(&mut self, var: &'static str, default: i64) -> i64 {
        let Some(raw) = self.optional(var) else {
            return default;
        };
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => id,
            Ok(id) => {
                self.problems.push(ConfigError::Invalid {
                    var,
                    reason: format!("expected a positive integer, got {id}"),
                });
                default
            }
            Err(e) => {
                self.problems.push(ConfigError::Invalid {
                    var,
                    reason: format!("'{raw}' is not an integer ({e})"),
                });
                default
            }
        }
    }

    fn flag(&mut self, var: &'static str) -> bool {
        let Some(raw) = self.optional(var) else {
            return false;
        };
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                self.problems.push(ConfigError::Invalid {
                    var,
                    reason: format!("'{raw}' is not a boolean"),
                });
                false
            }
        }
    }

    fn seconds(&mut self, var: &'static str, default: Duration) -> Duration {
        let Some(raw) = self.optional(var) else {
            return default;
        };
        raw.parse::<u64>().map_or_else(
            |e| {
                self.problems.push(ConfigError::Invalid {
                    var,
                    reason: format!("'{raw}' is not a number of seconds ({e})"),
                });
                default
            },
            Duration::from_secs,
        )
    }

    fn catalog(
        &mut self,
        url: &'static str,
        api_key: &'static str,
        root_folder_id: &'static str,
        quality_profile_id: &'static str,
    ) -> CatalogSettings {
        CatalogSettings {
            base_url: self.required(url),
            api_key: Secret::new(self.required(api_key)),
            root_folder_id: self.id(root_folder_id, DEFAULT_ROOT_FOLDER_ID),
            quality_profile_id: self.id(quality_profile_id, DEFAULT_QUALITY_PROFILE_ID),
        }
    }

    fn vpn_check(&mut self) -> Option<VpnCheckSettings> {
        if !self.flag("GLUETUN_CHECK") {
            return None;
        }
        let interval = self.seconds("GLUETUN_CHECK_INTERVAL_SECS", DEFAULT_VPN_CHECK_INTERVAL);
        let (Some(username), Some(password)) =
            (self.optional("GLUETUN_USER"), self.optional("GLUETUN_PASS"))
        else {
            tracing::warn!(
                "GLUETUN_CHECK is on but GLUETUN_USER or GLUETUN_PASS is missing; VPN check disabled"
            );
            return None;
        };
        Some(VpnCheckSettings {
            url: self
                .optional("GLUETUN_URL")
                .unwrap_or_else(|| DEFAULT_GLUETUN_URL.to_string()),
            username,
            password: Secret::new(password),
            expected_country: self
                .optional("GLUETUN_EXPECTED_COUNTRY")
                .unwrap_or_else(|| DEFAULT_EXPECTED_COUNTRY.to_string()),
            interval,
        })
    }
}

/// Build settings from a variable lookup.
pub fn from_lookup<F>(lookup: F) -> Result<Settings, ConfigErrors>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env = EnvReader::new(lookup);

    let telegram_token = Secret::new(env.required("TELEGRAM_BOT_TOKEN"));
    let movies = env.catalog(
        "RADARR_URL",
        "RADARR_API_KEY",
        "RADARR_ROOT_FOLDER_ID",
        "RADARR_QUALITY_PROFILE_ID",
    );
    let series = env.catalog(
        "SONARR_URL",
        "SONARR_API_KEY",
        "SONARR_ROOT_FOLDER_ID",
        "SONARR_QUALITY_PROFILE_ID",
    );
    let username = env.optional("QBITTORRENT_USERNAME");
    let downloads = DownloadClientSettings {
        base_url: env.required("QBITTORRENT_URL"),
        password: env.optional("QBITTORRENT_PASSWORD").map(Secret::new),
        username,
    };
    let allow_list = AllowList::parse(env.optional("ALLOWED_USER_IDS").as_deref());
    let vpn_check = env.vpn_check();

    if !env.problems.is_empty() {
        return Err(ConfigErrors(env.problems));
    }

    let settings = Settings {
        telegram_token,
        movies,
        series,
        downloads,
        allow_list,
        vpn_check,
    };
    validate_settings(&settings).map_err(|e| ConfigErrors(vec![e.into()]))?;
    Ok(settings)
}

/// Build settings from the process environment.
pub fn from_env() -> Result<Settings, ConfigErrors> {
    from_lookup(|var| std::env::var(var).ok())
}

/// Load variables from an env file into the process environment.
///
/// An explicit path must exist; the default `./.env` is optional. Variables
/// already set in the environment win. Returns the file that was loaded.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, BotError> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|()| Some(path.to_path_buf()))
            .map_err(|e| {
                ConfigErrors(vec![ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }])
                .into()
            }),
        None => Ok(dotenvy::dotenv().ok()),
    }
}

/// One-line description of the settings for the startup log. No secrets.
pub fn describe(settings: &Settings) -> String {
    let users = if settings.allow_list.is_open() {
        "everyone".to_string()
    } else {
        format!("{} user(s)", settings.allow_list.len())
    };
    let vpn = settings.vpn_check.as_ref().map_or_else(
        || "off".to_string(),
        |vpn| format!("every {}s, expecting {}", vpn.interval.as_secs(), vpn.expected_country),
    );
    format!(
        "radarr={} sonarr={} qbittorrent={} allowed={users} vpn_check={vpn}",
        settings.movies.base_url, settings.series.base_url, settings.downloads.base_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        env(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("RADARR_URL", "http://radarr:7878"),
            ("RADARR_API_KEY", "rkey"),
            ("SONARR_URL", "http://sonarr:8989"),
            ("SONARR_API_KEY", "skey"),
            ("QBITTORRENT_URL", "http://qbit:8080"),
        ])
    }

    fn load(vars: &HashMap<String, String>) -> Result<Settings, ConfigErrors> {
        from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn test_minimal_environment_uses_defaults() {
        let settings = load(&minimal()).unwrap();
        assert_eq!(settings.telegram_token.expose(), "123:abc");
        assert_eq!(settings.movies.root_folder_id, 1);
        assert_eq!(settings.series.quality_profile_id, 1);
        assert!(settings.downloads.username.is_none());
        assert!(settings.allow_list.is_open());
        assert!(settings.vpn_check.is_none());
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let err = load(&env(&[("RADARR_URL", "http://radarr:7878")])).unwrap_err();
        let problems = err.problems();
        assert!(problems.contains(&ConfigError::Missing("TELEGRAM_BOT_TOKEN")));
        assert!(problems.contains(&ConfigError::Missing("RADARR_API_KEY")));
        assert!(problems.contains(&ConfigError::Missing("SONARR_URL")));
        assert!(problems.contains(&ConfigError::Missing("SONARR_API_KEY")));
        assert!(problems.contains(&ConfigError::Missing("QBITTORRENT_URL")));
        assert!(!problems.contains(&ConfigError::Missing("RADARR_URL")));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let mut vars = minimal();
        vars.insert("SONARR_API_KEY".to_string(), "   ".to_string());
        let err = load(&vars).unwrap_err();
        assert_eq!(err.problems(), &[ConfigError::Missing("SONARR_API_KEY")]);
    }

    #[test]
    fn test_unparsable_ids_are_reported() {
        let mut vars = minimal();
        vars.insert("RADARR_ROOT_FOLDER_ID".to_string(), "two".to_string());
        vars.insert("SONARR_QUALITY_PROFILE_ID".to_string(), "-3".to_string());
        let err = load(&vars).unwrap_err();
        assert_eq!(err.problems().len(), 2);
        assert!(err.to_string().contains("RADARR_ROOT_FOLDER_ID"));
        assert!(err.to_string().contains("SONARR_QUALITY_PROFILE_ID"));
    }

    #[test]
    fn test_explicit_ids_and_credentials() {
        let mut vars = minimal();
        vars.insert("RADARR_ROOT_FOLDER_ID".to_string(), "5".to_string());
        vars.insert("SONARR_QUALITY_PROFILE_ID".to_string(), "7".to_string());
        vars.insert("QBITTORRENT_USERNAME".to_string(), "admin".to_string());
        vars.insert("QBITTORRENT_PASSWORD".to_string(), "pw".to_string());
        vars.insert("ALLOWED_USER_IDS".to_string(), "42, 7".to_string());

        let settings = load(&vars).unwrap();
        assert_eq!(settings.movies.root_folder_id, 5);
        assert_eq!(settings.series.quality_profile_id, 7);
        assert_eq!(settings.downloads.username.as_deref(), Some("admin"));
        assert_eq!(settings.allow_list.first(), Some(42));
        assert!(!settings.allow_list.is_allowed(1));
    }

    #[test]
    fn test_invalid_url_fails_validation() {
        let mut vars = minimal();
        vars.insert("QBITTORRENT_URL".to_string(), "qbit:8080".to_string());
        let err = load(&vars).unwrap_err();
        assert!(matches!(
            err.problems(),
            [ConfigError::Settings(SettingsError::InvalidUrl {
                field: "QBITTORRENT_URL",
                ..
            })]
        ));
    }

    #[test]
    fn test_vpn_check_needs_credentials() {
        let mut vars = minimal();
        vars.insert("GLUETUN_CHECK".to_string(), "true".to_string());
        assert!(load(&vars).unwrap().vpn_check.is_none());

        vars.insert("GLUETUN_USER".to_string(), "gluser".to_string());
        vars.insert("GLUETUN_PASS".to_string(), "glpass".to_string());
        let vpn = load(&vars).unwrap().vpn_check.unwrap();
        assert_eq!(vpn.url, DEFAULT_GLUETUN_URL);
        assert_eq!(vpn.expected_country, "Netherlands");
        assert_eq!(vpn.interval, Duration::from_secs(600));
    }

    #[test]
    fn test_vpn_check_overrides() {
        let mut vars = minimal();
        vars.insert("GLUETUN_CHECK".to_string(), "yes".to_string());
        vars.insert("GLUETUN_USER".to_string(), "u".to_string());
        vars.insert("GLUETUN_PASS".to_string(), "p".to_string());
        vars.insert("GLUETUN_URL".to_string(), "http://gluetun:8111/v1/publicip/ip".to_string());
        vars.insert("GLUETUN_EXPECTED_COUNTRY".to_string(), "Sweden".to_string());
        vars.insert("GLUETUN_CHECK_INTERVAL_SECS".to_string(), "120".to_string());

        let vpn = load(&vars).unwrap().vpn_check.unwrap();
        assert_eq!(vpn.url, "http://gluetun:8111/v1/publicip/ip");
        assert_eq!(vpn.expected_country, "Sweden");
        assert_eq!(vpn.interval, Duration::from_secs(120));
    }

    #[test]
    fn test_bad_flag_and_interval() {
        let mut vars = minimal();
        vars.insert("GLUETUN_CHECK".to_string(), "maybe".to_string());
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("GLUETUN_CHECK"));

        vars.insert("GLUETUN_CHECK".to_string(), "1".to_string());
        vars.insert("GLUETUN_CHECK_INTERVAL_SECS".to_string(), "10m".to_string());
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("GLUETUN_CHECK_INTERVAL_SECS"));
    }

    #[test]
    fn test_short_interval_fails_validation() {
        let mut vars = minimal();
        vars.insert("GLUETUN_CHECK".to_string(), "true".to_string());
        vars.insert("GLUETUN_USER".to_string(), "u".to_string());
        vars.insert("GLUETUN_PASS".to_string(), "p".to_string());
        vars.insert("GLUETUN_CHECK_INTERVAL_SECS".to_string(), "5".to_string());
        let err = load(&vars).unwrap_err();
        assert!(matches!(
            err.problems(),
            [ConfigError::Settings(SettingsError::IntervalTooShort { .. })]
        ));
    }

    #[test]
    fn test_loads_explicit_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# arrbot").unwrap();
        writeln!(file, "ARRBOT_TEST_QUOTED=\"from file\"").unwrap();
        writeln!(file, "ARRBOT_TEST_PLAIN=99").unwrap();

        let loaded = load_env_file(Some(file.path())).unwrap();
        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(std::env::var("ARRBOT_TEST_QUOTED").unwrap(), "from file");
        assert_eq!(std::env::var("ARRBOT_TEST_PLAIN").unwrap(), "99");
    }

    #[test]
    fn test_missing_env_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_file(Some(&dir.path().join("absent.env"))).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_describe_hides_secrets() {
        let settings = load(&minimal()).unwrap();
        let line = describe(&settings);
        assert!(line.contains("radarr=http://radarr:7878"));
        assert!(line.contains("allowed=everyone"));
        assert!(!line.contains("rkey"));
        assert!(!line.contains("123:abc"));
    }
}
