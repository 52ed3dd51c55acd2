//! Telegram update routing.
//!
//! Known commands go to [`handle_command`]; every other message and every
//! button press becomes an [`InboundEvent`] for the conversation service.
//! Commands addressed to another bot in a group are dropped.

mod commands;
mod events;

pub use commands::{DOWNLOADS_FETCHING_TEXT, VPN_NOT_CONFIGURED_TEXT, handle_command};
pub use events::text_event;

use std::sync::Arc;

use arrbot_core::InboundEvent;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{Me, MessageKind};
use teloxide::utils::command::BotCommands;
use teloxide::{RequestError, dptree};

use crate::bootstrap::BotContext;
use crate::commands::Command;
use crate::error::BotError;
use crate::jobs;

/// The dispatcher's handler tree.
pub fn schema() -> UpdateHandler<RequestError> {
    let messages = Update::filter_message()
        .branch(teloxide::filter_command::<Command, _>().endpoint(on_command))
        .branch(dptree::endpoint(on_message));

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_command(msg: Message, command: Command, ctx: Arc<BotContext>) -> ResponseResult<()> {
    let Some(user) = events::message_user(&msg) else {
        return Ok(());
    };
    handle_command(&ctx, &user, command).await;
    Ok(())
}

async fn on_message(msg: Message, me: Me, ctx: Arc<BotContext>) -> ResponseResult<()> {
    let Some(user) = events::message_user(&msg) else {
        return Ok(());
    };
    let event = match msg.text() {
        Some(text) => text_event(text, me.user.username.as_deref()),
        // stickers, photos and the like; service messages stay silent
        None if matches!(msg.kind, MessageKind::Common(_)) => Some(InboundEvent::NonText),
        None => None,
    };
    match event {
        Some(event) => ctx.conversation.handle(&user, event).await,
        None => tracing::debug!(user_id = user.user_id, "Ignoring message not meant for this bot"),
    }
    Ok(())
}

async fn on_callback(query: CallbackQuery, ctx: Arc<BotContext>) -> ResponseResult<()> {
    let user = events::callback_user(&query);
    let input = events::callback_input(&query);
    tracing::debug!(user_id = user.user_id, payload = %input.payload, "Button pressed");
    ctx.conversation
        .handle(&user, InboundEvent::Callback(input))
        .await;
    Ok(())
}

/// Verify the token, register commands, start jobs and poll until Ctrl-C.
pub async fn run(bot: Bot, ctx: BotContext) -> Result<(), BotError> {
    let me = bot.get_me().await?;
    tracing::info!(
        username = me.username.as_deref().unwrap_or("unknown"),
        id = %me.id,
        "Authenticated with Telegram"
    );

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    let ctx = Arc::new(ctx);
    let monitor = jobs::spawn_vpn_monitor(Arc::clone(&ctx));

    tracing::info!("Starting dispatcher with long polling");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![ctx])
        .default_handler(|update| async move {
            tracing::debug!(update = ?update.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    if let Some(monitor) = monitor {
        monitor.abort();
    }
    tracing::info!("Dispatcher stopped");
    Ok(())
}
