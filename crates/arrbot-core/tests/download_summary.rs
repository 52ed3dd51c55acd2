//! `/downloads` summary against a fake torrent client.

mod common;

use std::sync::Arc;

use arrbot_core::services::{NO_DOWNLOADS_TEXT, SUMMARY_HEADER};
use arrbot_core::utils::{MAX_MESSAGE_LEN, chunk_message};
use arrbot_core::{DownloadStatusError, DownloadStatusService, Transfer};
use common::FakeDownloads;
use tokio_test::{assert_err, assert_ok};

fn transfer(name: &str, progress: f64) -> Transfer {
    Transfer {
        name: name.to_string(),
        progress,
        size_bytes: 4 * 1024 * 1024 * 1024,
        state: "downloading".to_string(),
    }
}

fn service(transfers: Vec<Transfer>, fail: bool) -> DownloadStatusService {
    DownloadStatusService::new(Arc::new(FakeDownloads { transfers, fail }))
}

#[tokio::test]
async fn test_scenario_d_no_transfers_returns_sentinel() {
    let summary = assert_ok!(service(vec![], false).list_active().await);
    assert_eq!(summary, NO_DOWNLOADS_TEXT);
    assert!(!summary.is_empty());
}

#[tokio::test]
async fn test_summary_lists_every_transfer() {
    let summary = assert_ok!(
        service(
            vec![transfer("debian.iso", 0.5), transfer("<script>", 1.0)],
            false
        )
        .list_active()
        .await
    );

    assert!(summary.starts_with(SUMMARY_HEADER));
    assert!(summary.contains("debian.iso [█████░░░░░] 50% - 4.00 GB"));
    assert!(summary.contains("&lt;script&gt; [██████████] 100% - 4.00 GB"));
}

#[tokio::test]
async fn test_client_errors_are_values() {
    let err = assert_err!(service(vec![], true).list_active().await);
    assert!(matches!(err, DownloadStatusError::Authentication { .. }));
}

#[tokio::test]
async fn test_large_summary_chunks_under_limit() {
    let transfers = (0..400)
        .map(|i| transfer(&format!("transfer number {i}"), 0.1))
        .collect();
    let summary = assert_ok!(service(transfers, false).list_active().await);

    let chunks = chunk_message(&summary, MAX_MESSAGE_LEN);
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.chars().count() <= MAX_MESSAGE_LEN));
}
