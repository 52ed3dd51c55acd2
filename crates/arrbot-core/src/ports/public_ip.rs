//! Public IP probe used by the VPN health check.

use async_trait::async_trait;
use thiserror::Error;

/// What the VPN gateway reports as its egress address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicIpInfo {
    /// Public IP address.
    pub ip: String,
    /// Country the address geolocates to.
    pub country: Option<String>,
}

/// Errors from the public IP probe.
#[derive(Debug, Error)]
pub enum PublicIpError {
    /// The gateway could not be reached or answered with an error status.
    #[error("VPN gateway unreachable: {0}")]
    Unreachable(String),

    /// The gateway answered with an unexpected body.
    #[error("Invalid VPN gateway response: {0}")]
    InvalidResponse(String),
}

/// Something that can tell us the current public IP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicIpPort: Send + Sync {
    /// Ask the gateway for its current egress address.
    async fn lookup(&self) -> Result<PublicIpInfo, PublicIpError>;
}
