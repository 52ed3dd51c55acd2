//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

/// Telegram bot for adding movies and series to Radarr and Sonarr.
#[derive(Debug, Parser)]
#[command(name = "arrbot")]
#[command(about = "Telegram bot for Radarr, Sonarr and qBittorrent")]
#[command(version)]
pub struct Cli {
    /// Load environment variables from this file instead of ./.env
    #[arg(long = "env-file", env = "ARRBOT_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Validate the configuration and exit without connecting
    #[arg(long = "check-config")]
    pub check_config: bool,
}
