//! Radarr and Sonarr client for arrbot.
//!
//! Both managers speak the same v3 API shape, so one generic client serves
//! both; [`ArrFlavor`] picks the endpoints and the add payload. The client
//! is used through the core-owned `CatalogPort` trait.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultArrClient is meant to be used through CatalogPort, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultArrClient;

// Configuration
pub use config::{ArrClientConfig, ArrFlavor};

// Errors surfaced by construction
pub use error::ArrError;
