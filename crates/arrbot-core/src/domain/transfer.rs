//! Torrent transfers reported by the download client.

use serde::{Deserialize, Serialize};

/// One transfer in the download client's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Torrent name.
    pub name: String,
    /// Completion ratio, 0.0 to 1.0.
    pub progress: f64,
    /// Total size in bytes.
    pub size_bytes: u64,
    /// Client-reported state (e.g. `downloading`, `stalledUP`).
    pub state: String,
}

impl Transfer {
    /// Progress clamped to `0.0..=1.0`; NaN counts as zero.
    pub fn clamped_progress(&self) -> f64 {
        if self.progress.is_nan() {
            0.0
        } else {
            self.progress.clamp(0.0, 1.0)
        }
    }
}
