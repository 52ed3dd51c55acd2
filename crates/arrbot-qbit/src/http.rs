//! HTTP backend abstraction for the Web UI API.
//!
//! The backend only moves bytes; session handling and status interpretation
//! live in the client so they can be tested against canned replies. The
//! session cookie is set by hand on each request, no cookie store is kept.

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, REFERER, SET_COOKIE};
use url::Url;

use crate::config::QbitClientConfig;
use crate::error::QbitResult;
use crate::models::RawResponse;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for the transport under the qBittorrent client.
///
/// This is an implementation detail - external code should use the
/// `DownloadStatusPort` trait.
#[async_trait]
pub trait WebUiBackend: Send + Sync {
    /// POST an urlencoded form.
    async fn post_form(
        &self,
        url: &Url,
        form: &[(&str, &str)],
        sid: Option<&str>,
    ) -> QbitResult<RawResponse>;

    /// Plain GET.
    async fn get(&self, url: &Url, sid: Option<&str>) -> QbitResult<RawResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend with timeouts and the CSRF `Referer` preset.
    pub fn new(config: &QbitClientConfig, base_url: &Url) -> QbitResult<Self> {
        let mut headers = HeaderMap::new();
        // The Web UI rejects requests whose Referer does not match its host.
        if let Ok(referer) = HeaderValue::from_str(base_url.as_str()) {
            headers.insert(REFERER, referer);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    async fn into_raw(response: reqwest::Response) -> QbitResult<RawResponse> {
        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(ToString::to_string)
            .collect();
        let body = response.text().await?;
        Ok(RawResponse {
            status,
            body,
            set_cookies,
        })
    }
}

fn with_sid(request: reqwest::RequestBuilder, sid: Option<&str>) -> reqwest::RequestBuilder {
    match sid {
        Some(sid) => request.header(COOKIE, format!("SID={sid}")),
        None => request,
    }
}

#[async_trait]
impl WebUiBackend for ReqwestBackend {
    async fn post_form(
        &self,
        url: &Url,
        form: &[(&str, &str)],
        sid: Option<&str>,
    ) -> QbitResult<RawResponse> {
        let request = with_sid(self.client.post(url.as_str()).form(form), sid);
        Self::into_raw(request.send().await?).await
    }

    async fn get(&self, url: &Url, sid: Option<&str>) -> QbitResult<RawResponse> {
        let request = with_sid(self.client.get(url.as_str()), sid);
        Self::into_raw(request.send().await?).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
