//! Slash command handling.
//!
//! `/start` and `/cancel` belong to the conversation service. The other
//! commands answer directly; every one of them is allow-list gated.

use arrbot_core::conversation::screens::{HELP_TEXT, UNAUTHORIZED_TEXT};
use arrbot_core::utils::{MAX_MESSAGE_LEN, chunk_message, escape_html};
use arrbot_core::{ChatUser, InboundEvent};

use crate::bootstrap::BotContext;
use crate::commands::Command;

/// Sent before the transfer list is requested.
pub const DOWNLOADS_FETCHING_TEXT: &str = "Fetching download status from qBittorrent...";

/// Reply to `/vpnstatus` when the check is off.
pub const VPN_NOT_CONFIGURED_TEXT: &str =
    "VPN check is not configured. Set GLUETUN_CHECK, GLUETUN_USER and GLUETUN_PASS to enable it.";

/// Dispatch one parsed command.
pub async fn handle_command(ctx: &BotContext, user: &ChatUser, command: Command) {
    tracing::info!(
        user_id = user.user_id,
        chat_id = user.chat_id,
        command = ?command,
        "Command received"
    );
    match command {
        Command::Start => ctx.conversation.handle(user, InboundEvent::Start).await,
        Command::Cancel => ctx.conversation.handle(user, InboundEvent::Cancel).await,
        Command::Help => {
            if admit(ctx, user).await {
                reply(ctx, user.chat_id, HELP_TEXT).await;
            }
        }
        Command::Downloads => {
            if admit(ctx, user).await {
                downloads(ctx, user).await;
            }
        }
        Command::VpnStatus => {
            if admit(ctx, user).await {
                vpn_status(ctx, user).await;
            }
        }
    }
}

/// Allow-list gate for commands outside the conversation.
async fn admit(ctx: &BotContext, user: &ChatUser) -> bool {
    if ctx.allow_list.is_allowed(user.user_id) {
        return true;
    }
    tracing::warn!(user_id = user.user_id, chat_id = user.chat_id, "Unauthorized user");
    ctx.conversation.sessions().clear(user.key()).await;
    reply(ctx, user.chat_id, UNAUTHORIZED_TEXT).await;
    false
}

async fn reply(ctx: &BotContext, chat_id: i64, text: &str) {
    if let Err(e) = ctx.chat.send_text(chat_id, text, None).await {
        tracing::warn!(chat_id, error = %e, "Failed to send reply");
    }
}

async fn downloads(ctx: &BotContext, user: &ChatUser) {
    reply(ctx, user.chat_id, DOWNLOADS_FETCHING_TEXT).await;
    match ctx.downloads.list_active().await {
        Ok(summary) => {
            for chunk in chunk_message(&summary, MAX_MESSAGE_LEN) {
                reply(ctx, user.chat_id, &chunk).await;
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Download status unavailable");
            reply(ctx, user.chat_id, &format!("Error: {}", escape_html(&e.to_string()))).await;
        }
    }
}

async fn vpn_status(ctx: &BotContext, user: &ChatUser) {
    let Some(vpn) = &ctx.vpn else {
        reply(ctx, user.chat_id, VPN_NOT_CONFIGURED_TEXT).await;
        return;
    };
    // The on-demand check answers the asking user only.
    let status = vpn.service.check().await;
    reply(ctx, user.chat_id, &status.message()).await;
}

