//! VPN egress check.
//!
//! Asks the VPN gateway for its public IP and compares the reported
//! country against the expected one.

use std::sync::Arc;

use crate::ports::PublicIpPort;
use crate::utils::escape_html;

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VpnStatus {
    /// Egress is in the expected country.
    Healthy {
        /// Public IP.
        ip: String,
        /// Reported country.
        country: String,
    },
    /// Egress is somewhere else, or the country is unknown.
    WrongCountry {
        /// Public IP.
        ip: String,
        /// Reported country, if any.
        country: Option<String>,
        /// Country we expected.
        expected: String,
    },
    /// The gateway did not answer properly.
    Unreachable {
        /// Error text.
        error: String,
    },
}

impl VpnStatus {
    /// True when no alert is needed.
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy { .. })
    }

    /// HTML message describing the status.
    pub fn message(&self) -> String {
        match self {
            Self::Healthy { ip, country } => format!(
                "✅ VPN OK: public IP <code>{}</code> ({}).",
                escape_html(ip),
                escape_html(country)
            ),
            Self::WrongCountry {
                ip,
                country,
                expected,
            } => format!(
                "⚠️ VPN alert: public IP <code>{}</code> is in {}, expected {}.",
                escape_html(ip),
                escape_html(country.as_deref().unwrap_or("an unknown country")),
                escape_html(expected)
            ),
            Self::Unreachable { error } => format!(
                "⚠️ VPN alert: couldn't reach the VPN gateway ({}).",
                escape_html(error)
            ),
        }
    }
}

/// Checks the VPN gateway's public IP.
pub struct VpnHealthService {
    probe: Arc<dyn PublicIpPort>,
    expected_country: String,
}

impl VpnHealthService {
    /// Create a checker expecting `expected_country`.
    pub fn new(probe: Arc<dyn PublicIpPort>, expected_country: impl Into<String>) -> Self {
        Self {
            probe,
            expected_country: expected_country.into(),
        }
    }

    /// Run one check.
    pub async fn check(&self) -> VpnStatus {
        let info = match self.probe.lookup().await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(error = %e, "VPN gateway check failed");
                return VpnStatus::Unreachable {
                    error: e.to_string(),
                };
            }
        };

        let matches = info
            .country
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(self.expected_country.trim()));

        match (matches, info.country) {
            (true, Some(country)) => {
                tracing::debug!(ip = %info.ip, country = %country, "VPN egress OK");
                VpnStatus::Healthy {
                    ip: info.ip,
                    country,
                }
            }
            (_, country) => {
                tracing::warn!(
                    ip = %info.ip,
                    country = ?country,
                    expected = %self.expected_country,
                    "VPN egress in unexpected country"
                );
                VpnStatus::WrongCountry {
                    ip: info.ip,
                    country,
                    expected: self.expected_country.clone(),
                }
            }
        }
    }
}

impl std::fmt::Debug for VpnHealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VpnHealthService")
            .field("expected_country", &self.expected_country)
            .finish_non_exhaustive()
    }
}
