//! Core domain for arrbot.
//!
//! Holds the domain types, the ports the adapters implement, the allow-list
//! gate, the immutable settings and the conversation state machine. Nothing
//! in here knows about HTTP or Telegram.
#![deny(unused_crate_dependencies)]

pub mod access;
pub mod conversation;
pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;
pub mod utils;

// Re-export commonly used types for convenience
pub use access::AllowList;
pub use conversation::{
    CallbackInput, ChatUser, ConversationService, ConversationState, InboundEvent, Session,
    SessionKey, StateTag,
};
pub use domain::{CatalogEntry, CatalogKind, Transfer};
pub use ports::{
    Button, CatalogError, CatalogPort, CatalogResult, Catalogs, ChatError, ChatPort, ChatResult,
    DownloadStatusError, DownloadStatusPort, Keyboard, MessageRef, PublicIpError, PublicIpInfo,
    PublicIpPort,
};
pub use services::{DownloadStatusService, VpnHealthService, VpnStatus};
pub use settings::{
    CatalogSettings, DownloadClientSettings, Secret, Settings, SettingsError, VpnCheckSettings,
    validate_settings,
};

// Dev-dependencies only used by the integration tests
#[cfg(test)]
use tokio_test as _;
