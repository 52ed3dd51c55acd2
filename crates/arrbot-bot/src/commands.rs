//! Slash commands the bot registers with Telegram.

use teloxide::utils::command::BotCommands;

/// Supported commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "search for a movie or series to add")]
    Start,
    #[command(description = "show what the bot can do")]
    Help,
    #[command(description = "show the current torrent transfers")]
    Downloads,
    #[command(description = "stop the current search")]
    Cancel,
    #[command(description = "check where the VPN connection exits")]
    VpnStatus,
}
