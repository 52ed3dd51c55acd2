//! Gluetun public IP probe.

use async_trait::async_trait;
use arrbot_core::{PublicIpError, PublicIpInfo, PublicIpPort, Secret, VpnCheckSettings};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Timeout for one probe request.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of Gluetun's `/v1/publicip/ip`.
#[derive(Debug, Deserialize)]
struct PublicIpBody {
    #[serde(alias = "ip")]
    public_ip: String,
    #[serde(default)]
    country: Option<String>,
}

/// Asks the Gluetun control server for the tunnel's public IP.
pub struct GluetunProbe {
    client: reqwest::Client,
    url: Url,
    username: String,
    password: Secret,
}

impl GluetunProbe {
    /// Create a probe for the configured endpoint.
    pub fn new(settings: &VpnCheckSettings) -> Result<Self, PublicIpError> {
        let url = Url::parse(settings.url.trim())
            .map_err(|e| PublicIpError::Unreachable(format!("invalid URL: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| PublicIpError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            url,
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }
}

/// Parse the probe response body.
pub fn parse_public_ip(body: &str) -> Result<PublicIpInfo, PublicIpError> {
    let parsed: PublicIpBody =
        serde_json::from_str(body).map_err(|e| PublicIpError::InvalidResponse(e.to_string()))?;
    Ok(PublicIpInfo {
        ip: parsed.public_ip,
        country: parsed.country.filter(|c| !c.trim().is_empty()),
    })
}

#[async_trait]
impl PublicIpPort for GluetunProbe {
    async fn lookup(&self) -> Result<PublicIpInfo, PublicIpError> {
        let response = self
            .client
            .get(self.url.as_str())
            .basic_auth(&self.username, Some(self.password.expose()))
            .send()
            .await
            .map_err(|e| PublicIpError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublicIpError::Unreachable(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PublicIpError::Unreachable(e.to_string()))?;
        tracing::debug!(body = %body, "Gluetun public IP response");
        parse_public_ip(&body)
    }
}
