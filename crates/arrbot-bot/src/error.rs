//! Bot error types and exit codes.

use thiserror::Error;

use crate::config::ConfigErrors;

/// Errors that stop the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// The environment is incomplete or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An adapter could not be built.
    #[error("Startup error: {0}")]
    Startup(String),

    /// Telegram refused the token or could not be reached.
    #[error("Telegram error: {0}")]
    Telegram(String),
}

impl BotError {
    /// Map error to a process exit code (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Startup(_) => 70,  // EX_SOFTWARE
            Self::Telegram(_) => 69, // EX_UNAVAILABLE
        }
    }
}

impl From<ConfigErrors> for BotError {
    fn from(err: ConfigErrors) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<arrbot_arr::ArrError> for BotError {
    fn from(err: arrbot_arr::ArrError) -> Self {
        Self::Startup(err.to_string())
    }
}

impl From<arrbot_qbit::QbitError> for BotError {
    fn from(err: arrbot_qbit::QbitError) -> Self {
        Self::Startup(err.to_string())
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        Self::Telegram(err.to_string())
    }
}
