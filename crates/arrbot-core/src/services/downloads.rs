//! Download summary for `/downloads`.

use std::sync::Arc;

use crate::domain::Transfer;
use crate::ports::{DownloadStatusError, DownloadStatusPort};
use crate::utils::{escape_html, truncate_chars};

/// Returned when the client has no transfers at all.
pub const NO_DOWNLOADS_TEXT: &str = "No active downloads found";

/// First line of a non-empty summary.
pub const SUMMARY_HEADER: &str = "<b>Current Downloads:</b>\n";

const NAME_WIDTH: usize = 26;
const BAR_SEGMENTS: usize = 10;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Formats the torrent client's transfer list.
pub struct DownloadStatusService {
    client: Arc<dyn DownloadStatusPort>,
}

impl DownloadStatusService {
    /// Wrap a download client.
    pub fn new(client: Arc<dyn DownloadStatusPort>) -> Self {
        Self { client }
    }

    /// HTML summary of every transfer, or [`NO_DOWNLOADS_TEXT`].
    pub async fn list_active(&self) -> Result<String, DownloadStatusError> {
        let transfers = self.client.list_transfers().await?;
        tracing::debug!(count = transfers.len(), "Fetched transfer list");
        Ok(summarize_transfers(&transfers))
    }
}

impl std::fmt::Debug for DownloadStatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadStatusService").finish_non_exhaustive()
    }
}

/// Header plus one line per transfer; the sentinel when there are none.
pub fn summarize_transfers(transfers: &[Transfer]) -> String {
    if transfers.is_empty() {
        return NO_DOWNLOADS_TEXT.to_string();
    }
    let lines: Vec<String> = transfers.iter().map(format_transfer_line).collect();
    format!("{SUMMARY_HEADER}\n{}", lines.join("\n"))
}

/// `name [███████░░░] 75% - 1.50 GB`
#[allow(clippy::cast_precision_loss)]
pub fn format_transfer_line(transfer: &Transfer) -> String {
    let progress = transfer.clamped_progress();
    let name = escape_html(truncate_chars(&transfer.name, NAME_WIDTH));
    let size_gb = transfer.size_bytes as f64 / BYTES_PER_GB;
    format!(
        "{name} [{}] {}% - {size_gb:.2} GB",
        progress_bar(progress),
        whole_percent(progress)
    )
}

/// Ten-segment bar with `floor(progress * 10)` filled segments.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_bar(progress: f64) -> String {
    let filled =
        ((progress.clamp(0.0, 1.0) * BAR_SEGMENTS as f64).floor() as usize).min(BAR_SEGMENTS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_SEGMENTS - filled))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_percent(progress: f64) -> u32 {
    (progress * 100.0).floor() as u32
}
