//! Domain types shared by every arrbot crate.
//!
//! These types are pure data: no HTTP, no Telegram, no persistence.

mod catalog;
mod transfer;

pub use catalog::{CatalogEntry, CatalogKind};
pub use transfer::Transfer;
