//! HTTP backend abstraction for the v3 API.
//!
//! A trait-based backend keeps the client testable. The production
//! implementation uses reqwest with the `X-Api-Key` header preset and no
//! retries: a failed call surfaces immediately.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ArrClientConfig;
use crate::error::{ArrError, ArrResult};

/// Longest response body kept in errors and logs.
const MAX_ERROR_BODY: usize = 500;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that speak JSON.
///
/// This is an implementation detail - external code should use the
/// `CatalogPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ArrResult<T>;

    /// POST a JSON body; any 2xx status is success.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> ArrResult<()>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    write_timeout: std::time::Duration,
}

impl ReqwestBackend {
    /// Create a backend with the API key and read timeout preset.
    pub fn new(config: &ArrClientConfig) -> ArrResult<Self> {
        let mut headers = HeaderMap::new();
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| ArrError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        headers.insert("X-Api-Key", api_key);

        let client = reqwest::Client::builder()
            .timeout(config.read_timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            write_timeout: config.write_timeout,
        })
    }

    /// Turn a non-success response into `ApiRequestFailed`.
    async fn check_status(url: &Url, response: reqwest::Response) -> ArrResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ArrError::ApiRequestFailed {
            status: status.as_u16(),
            url: redact_query(url),
            body: truncate_body(&body),
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ArrResult<T> {
        let response = self.client.get(url.as_str()).send().await?;
        let response = Self::check_status(url, response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> ArrResult<()> {
        let response = self
            .client
            .post(url.as_str())
            .timeout(self.write_timeout)
            .json(body)
            .send()
            .await?;
        Self::check_status(url, response).await?;
        Ok(())
    }
}

/// URL without its query string, for logs.
fn redact_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
