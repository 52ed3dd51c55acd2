//! Background jobs.

use std::sync::Arc;
use std::time::Duration;

use arrbot_core::{ChatPort, VpnHealthService, VpnStatus};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::bootstrap::BotContext;

/// Delay before the first periodic VPN check.
pub const FIRST_CHECK_DELAY: Duration = Duration::from_secs(10);

/// Run one VPN check and alert `recipient` when it is not healthy.
pub async fn run_vpn_check(
    vpn: &VpnHealthService,
    chat: &dyn ChatPort,
    recipient: Option<i64>,
) -> VpnStatus {
    let status = vpn.check().await;
    if status.is_healthy() {
        tracing::info!("VPN check passed");
        return status;
    }

    match recipient {
        Some(chat_id) => {
            if let Err(e) = chat.send_text(chat_id, &status.message(), None).await {
                tracing::warn!(chat_id, error = %e, "Failed to send VPN alert");
            }
        }
        None => tracing::warn!("No allowed user configured to receive VPN alerts"),
    }
    status
}

/// Start the periodic VPN check, if enabled.
pub fn spawn_vpn_monitor(ctx: Arc<BotContext>) -> Option<JoinHandle<()>> {
    let vpn = ctx.vpn.clone()?;
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + FIRST_CHECK_DELAY, vpn.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_vpn_check(&vpn.service, ctx.chat.as_ref(), ctx.alert_recipient()).await;
        }
    }))
}
