//! qBittorrent Web API client for arrbot.
//!
//! Every call opens its own Web UI session: log in, read the transfer list,
//! log out. The client is used through the core-owned `DownloadStatusPort`
//! trait.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultQbitClient is meant to be used through DownloadStatusPort, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

// ============================================================================
// Public API
// ============================================================================

pub use client::DefaultQbitClient;
pub use config::QbitClientConfig;
pub use error::QbitError;
