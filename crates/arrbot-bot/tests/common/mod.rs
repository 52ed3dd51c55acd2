//! Fakes for exercising command handling without Telegram or HTTP.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arrbot_bot::{BotContext, VpnCheck};
use arrbot_core::{
    AllowList, CatalogEntry, CatalogKind, CatalogPort, CatalogResult, Catalogs, ChatPort,
    ChatResult, DownloadStatusError, DownloadStatusPort, Keyboard, MessageRef, PublicIpError,
    PublicIpInfo, PublicIpPort, Transfer, VpnHealthService,
};
use async_trait::async_trait;

/// A sent message: chat id, text, whether it had buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
    pub has_keyboard: bool,
}

/// Records every outgoing text message.
#[derive(Default)]
pub struct FakeChat {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicI32,
}

impl FakeChat {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.text).collect()
    }

    fn record(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> i32 {
        self.sent.lock().unwrap().push(Sent {
            chat_id,
            text: text.to_string(),
            has_keyboard: keyboard.is_some_and(|k| !k.is_empty()),
        });
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl ChatPort for FakeChat {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef> {
        let id = self.record(chat_id, text, keyboard);
        Ok(MessageRef::text(chat_id, id))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        _photo_url: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef> {
        let id = self.record(chat_id, caption, keyboard);
        Ok(MessageRef::photo(chat_id, id))
    }

    async fn edit_text(&self, _: &MessageRef, _: &str, _: Option<&Keyboard>) -> ChatResult<()> {
        Ok(())
    }

    async fn edit_caption(&self, _: &MessageRef, _: &str, _: Option<&Keyboard>) -> ChatResult<()> {
        Ok(())
    }

    async fn delete(&self, _: &MessageRef) -> ChatResult<()> {
        Ok(())
    }

    async fn answer_callback(&self, _: &str) -> ChatResult<()> {
        Ok(())
    }
}

/// A catalog that never finds anything.
pub struct EmptyCatalog(pub CatalogKind);

#[async_trait]
impl CatalogPort for EmptyCatalog {
    fn kind(&self) -> CatalogKind {
        self.0
    }

    fn service_name(&self) -> &str {
        match self.0 {
            CatalogKind::Movie => "Radarr",
            CatalogKind::Series => "Sonarr",
        }
    }

    async fn search(&self, _term: &str) -> CatalogResult<Vec<CatalogEntry>> {
        Ok(Vec::new())
    }

    async fn add(&self, _entry: &CatalogEntry) -> CatalogResult<()> {
        Ok(())
    }
}

/// Download client with a canned answer.
pub struct FakeDownloads {
    transfers: Option<Vec<Transfer>>,
    calls: AtomicUsize,
}

impl FakeDownloads {
    pub fn with(transfers: Vec<Transfer>) -> Self {
        Self {
            transfers: Some(transfers),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            transfers: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DownloadStatusPort for FakeDownloads {
    async fn list_transfers(&self) -> Result<Vec<Transfer>, DownloadStatusError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.transfers
            .clone()
            .ok_or_else(|| DownloadStatusError::Authentication {
                message: "invalid username or password for 'admin'".to_string(),
            })
    }
}

/// Public IP probe with a canned answer.
pub struct FakeProbe(pub Option<PublicIpInfo>);

#[async_trait]
impl PublicIpPort for FakeProbe {
    async fn lookup(&self) -> Result<PublicIpInfo, PublicIpError> {
        self.0
            .clone()
            .ok_or_else(|| PublicIpError::Unreachable("connection refused".to_string()))
    }
}

pub fn probe_in(country: &str) -> FakeProbe {
    FakeProbe(Some(PublicIpInfo {
        ip: "185.65.134.1".to_string(),
        country: Some(country.to_string()),
    }))
}

pub fn vpn_check(probe: FakeProbe) -> VpnCheck {
    VpnCheck {
        service: Arc::new(VpnHealthService::new(Arc::new(probe), "Netherlands")),
        interval: Duration::from_secs(600),
    }
}

pub fn transfer(name: &str, progress: f64) -> Transfer {
    Transfer {
        name: name.to_string(),
        progress,
        size_bytes: 1_073_741_824,
        state: "downloading".to_string(),
    }
}

/// Context plus handles to its fakes.
pub struct Harness {
    pub ctx: BotContext,
    pub chat: Arc<FakeChat>,
    pub downloads: Arc<FakeDownloads>,
}

pub fn harness(downloads: FakeDownloads, allow_list: AllowList, vpn: Option<VpnCheck>) -> Harness {
    let chat = Arc::new(FakeChat::default());
    let downloads = Arc::new(downloads);
    let ctx = BotContext::new(
        chat.clone(),
        Catalogs::new(
            Arc::new(EmptyCatalog(CatalogKind::Movie)),
            Arc::new(EmptyCatalog(CatalogKind::Series)),
        )
        .unwrap(),
        downloads.clone(),
        allow_list,
        vpn,
    );
    Harness {
        ctx,
        chat,
        downloads,
    }
}
