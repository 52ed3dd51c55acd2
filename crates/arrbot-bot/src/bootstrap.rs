//! Bot bootstrap - the composition root.
//!
//! The only place where adapters are instantiated. Handlers receive the
//! finished [`BotContext`] and talk to the core services through it.

use std::sync::Arc;
use std::time::Duration;

use arrbot_arr::{ArrClientConfig, ArrFlavor, DefaultArrClient};
use arrbot_core::{
    AllowList, Catalogs, ChatPort, ConversationService, DownloadStatusPort, DownloadStatusService,
    Settings, VpnHealthService,
};
use arrbot_qbit::{DefaultQbitClient, QbitClientConfig};
use teloxide::Bot;

use crate::error::BotError;
use crate::gluetun::GluetunProbe;
use crate::transport::TelegramChat;

/// The periodic VPN check, when enabled.
#[derive(Clone)]
pub struct VpnCheck {
    /// Runs one check.
    pub service: Arc<VpnHealthService>,
    /// Time between periodic checks.
    pub interval: Duration,
}

/// Fully composed context shared by every handler.
pub struct BotContext {
    /// Outbound messages.
    pub chat: Arc<dyn ChatPort>,
    /// Who may use the bot.
    pub allow_list: Arc<AllowList>,
    /// Search-and-add conversations.
    pub conversation: Arc<ConversationService>,
    /// `/downloads` summary.
    pub downloads: Arc<DownloadStatusService>,
    /// `/vpnstatus` and the periodic check.
    pub vpn: Option<VpnCheck>,
}

impl BotContext {
    /// Assemble a context from ports.
    pub fn new(
        chat: Arc<dyn ChatPort>,
        catalogs: Catalogs,
        downloads: Arc<dyn DownloadStatusPort>,
        allow_list: AllowList,
        vpn: Option<VpnCheck>,
    ) -> Self {
        let allow_list = Arc::new(allow_list);
        let conversation = Arc::new(ConversationService::new(
            catalogs,
            Arc::clone(&chat),
            Arc::clone(&allow_list),
        ));
        Self {
            chat,
            allow_list,
            conversation,
            downloads: Arc::new(DownloadStatusService::new(downloads)),
            vpn,
        }
    }

    /// Who receives VPN alerts: the first configured user.
    pub fn alert_recipient(&self) -> Option<i64> {
        self.allow_list.first()
    }
}

/// Bootstrap the bot.
///
/// Builds the Radarr, Sonarr and qBittorrent clients, the optional Gluetun
/// probe and the Telegram transport. Nothing is contacted here.
pub fn bootstrap(settings: &Settings, bot: Bot) -> Result<BotContext, BotError> {
    let radarr = DefaultArrClient::new(&ArrClientConfig::from_settings(
        ArrFlavor::Radarr,
        &settings.movies,
    ))?;
    let sonarr = DefaultArrClient::new(&ArrClientConfig::from_settings(
        ArrFlavor::Sonarr,
        &settings.series,
    ))?;
    let qbit = DefaultQbitClient::new(&QbitClientConfig::from_settings(&settings.downloads))?;

    let vpn = match &settings.vpn_check {
        Some(vpn) => {
            let probe = GluetunProbe::new(vpn).map_err(|e| BotError::Startup(e.to_string()))?;
            tracing::info!(
                url = %vpn.url,
                interval_secs = vpn.interval.as_secs(),
                "VPN check enabled"
            );
            Some(VpnCheck {
                service: Arc::new(VpnHealthService::new(
                    Arc::new(probe),
                    vpn.expected_country.clone(),
                )),
                interval: vpn.interval,
            })
        }
        None => None,
    };

    let catalogs = Catalogs::new(Arc::new(radarr), Arc::new(sonarr))
        .map_err(|e| BotError::Startup(e.to_string()))?;
    let chat: Arc<dyn ChatPort> = Arc::new(TelegramChat::new(bot));
    Ok(BotContext::new(
        chat,
        catalogs,
        Arc::new(qbit),
        settings.allow_list.clone(),
        vpn,
    ))
}
