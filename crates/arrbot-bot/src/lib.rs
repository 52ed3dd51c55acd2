//! Telegram front end for arrbot.
//!
//! Reads the environment into [`Settings`](arrbot_core::Settings), wires
//! the Radarr, Sonarr and qBittorrent adapters into the core services and
//! routes Telegram updates to them.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use anyhow as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod error;
pub mod gluetun;
pub mod handlers;
pub mod jobs;
pub mod parser;
pub mod transport;

pub use bootstrap::{BotContext, VpnCheck, bootstrap};
pub use commands::Command;
pub use config::{ConfigError, ConfigErrors};
pub use error::BotError;
pub use parser::Cli;
