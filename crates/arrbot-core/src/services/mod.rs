//! Application services built on the ports.

mod downloads;
mod vpn_health;

pub use downloads::{
    DownloadStatusService, NO_DOWNLOADS_TEXT, SUMMARY_HEADER, format_transfer_line, progress_bar,
    summarize_transfers,
};
pub use vpn_health::{VpnHealthService, VpnStatus};
