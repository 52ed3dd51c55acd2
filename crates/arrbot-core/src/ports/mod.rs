//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the conversation core expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `teloxide` types in any signature
//! - Adapters map their internal errors to the port error at the boundary
//! - Every trait is `Send + Sync` so it can sit behind an `Arc<dyn _>`

pub mod catalog;
pub mod chat;
pub mod download_status;
pub mod public_ip;

pub use catalog::{CatalogError, CatalogPort, CatalogResult, Catalogs};
pub use chat::{Button, ChatError, ChatPort, ChatResult, Keyboard, MessageRef};
pub use download_status::{DownloadStatusError, DownloadStatusPort};
pub use public_ip::{PublicIpError, PublicIpInfo, PublicIpPort};
