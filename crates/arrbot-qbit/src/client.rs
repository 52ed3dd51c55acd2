//! qBittorrent Web UI client.
//!
//! One session per call: `login` hands back the SID, the transfer list is
//! read with it, and `logout` closes it whatever the outcome.

use url::Url;

use crate::config::QbitClientConfig;
use crate::error::{QbitError, QbitResult};
use crate::http::{ReqwestBackend, WebUiBackend};
use crate::models::{RawResponse, TorrentInfo};

/// Default client using the reqwest backend.
pub type DefaultQbitClient = QbitClient<ReqwestBackend>;

/// Login credentials.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Client for one qBittorrent instance.
pub struct QbitClient<B: WebUiBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
    pub(crate) credentials: Option<Credentials>,
}

impl DefaultQbitClient {
    /// Create a client; fails on an unparsable base URL.
    pub fn new(config: &QbitClientConfig) -> QbitResult<Self> {
        let base_url = Url::parse(config.base_url.trim())?;
        let backend = ReqwestBackend::new(config, &base_url)?;
        Ok(Self::from_parts(config, base_url, backend))
    }
}

impl<B: WebUiBackend> QbitClient<B> {
    fn from_parts(config: &QbitClientConfig, base_url: Url, backend: B) -> Self {
        let credentials = config.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            password: config.password.clone().unwrap_or_default(),
        });
        Self {
            backend,
            base_url,
            credentials,
        }
    }

    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: &QbitClientConfig, backend: B) -> QbitResult<Self> {
        let base_url = Url::parse(config.base_url.trim())?;
        Ok(Self::from_parts(config, base_url, backend))
    }

    /// `{base}/api/v2/{endpoint}`, keeping any path prefix on the base.
    fn api_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}/api/v2/{endpoint}"));
        url.set_query(None);
        url
    }

    fn api_error(url: &Url, response: RawResponse) -> QbitError {
        QbitError::Api {
            status: response.status,
            url: url.to_string(),
            body: response.body,
        }
    }

    /// Open a session. Returns `None` when no credentials are configured or
    /// the server did not hand out a cookie (e.g. localhost auth bypass).
    pub(crate) async fn login(&self) -> QbitResult<Option<String>> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };
        let url = self.api_url("auth/login");
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response = self.backend.post_form(&url, &form, None).await?;
        let verdict = response.body.trim().to_owned();

        match (response.status, verdict.as_str()) {
            (200, "Ok.") => {
                let sid = response
                    .set_cookies
                    .iter()
                    .find_map(|cookie| parse_sid(cookie))
                    .map(ToString::to_string);
                if sid.is_none() {
                    tracing::debug!("qBittorrent login succeeded without a session cookie");
                }
                Ok(sid)
            }
            (_, "Fails.") => Err(QbitError::Auth(format!(
                "invalid username or password for '{}'",
                credentials.username
            ))),
            (403, _) => Err(QbitError::Auth(
                "client IP is banned after too many failed logins".to_string(),
            )),
            _ => Err(Self::api_error(&url, response)),
        }
    }

    /// Every torrent the client knows about.
    pub(crate) async fn torrents(&self, sid: Option<&str>) -> QbitResult<Vec<TorrentInfo>> {
        let url = self.api_url("torrents/info");
        let response = self.backend.get(&url, sid).await?;
        if response.status == 403 {
            return Err(QbitError::Auth("session was not accepted".to_string()));
        }
        if !response.is_success() {
            return Err(Self::api_error(&url, response));
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Close a session; failures are only logged.
    pub(crate) async fn logout(&self, sid: &str) {
        let url = self.api_url("auth/logout");
        match self.backend.post_form(&url, &[], Some(sid)).await {
            Ok(response) if response.is_success() => {
                tracing::debug!("Logged out from qBittorrent");
            }
            Ok(response) => {
                tracing::warn!(status = response.status, "qBittorrent logout refused");
            }
            Err(e) => tracing::warn!(error = %e, "qBittorrent logout failed"),
        }
    }

    /// Login, list, logout.
    pub(crate) async fn fetch_torrents(&self) -> QbitResult<Vec<TorrentInfo>> {
        let sid = self.login().await?;
        let result = self.torrents(sid.as_deref()).await;
        if let Some(sid) = &sid {
            self.logout(sid).await;
        }
        result
    }
}

/// Extract the session id from a `Set-Cookie` value like
/// `SID=abc123; HttpOnly; path=/`.
pub(crate) fn parse_sid(set_cookie: &str) -> Option<&str> {
    set_cookie
        .split(';')
        .next()
        .map(str::trim)
        .and_then(|pair| pair.strip_prefix("SID="))
        .filter(|sid| !sid.is_empty())
}
