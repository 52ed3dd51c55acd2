//! Fake ports shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use arrbot_core::{
    CatalogEntry, CatalogError, CatalogKind, CatalogPort, CatalogResult, ChatError, ChatPort,
    ChatResult, DownloadStatusError, DownloadStatusPort, Keyboard, MessageRef, Transfer,
};
use async_trait::async_trait;

// ============================================================================
// Catalog
// ============================================================================

/// What the fake catalog answers to `search`.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Results(Vec<CatalogEntry>),
    Unavailable,
}

/// In-memory catalog that records every call.
pub struct FakeCatalog {
    kind: CatalogKind,
    name: String,
    search: Mutex<SearchOutcome>,
    add_fails: AtomicBool,
    searches: Mutex<Vec<String>>,
    adds: Mutex<Vec<CatalogEntry>>,
}

impl FakeCatalog {
    pub fn new(kind: CatalogKind) -> Self {
        let name = match kind {
            CatalogKind::Movie => "Radarr",
            CatalogKind::Series => "Sonarr",
        };
        Self {
            kind,
            name: name.to_string(),
            search: Mutex::new(SearchOutcome::Results(Vec::new())),
            add_fails: AtomicBool::new(false),
            searches: Mutex::new(Vec::new()),
            adds: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(self, results: Vec<CatalogEntry>) -> Self {
        *self.search.lock().unwrap() = SearchOutcome::Results(results);
        self
    }

    pub fn unavailable(self) -> Self {
        *self.search.lock().unwrap() = SearchOutcome::Unavailable;
        self
    }

    pub fn failing_adds(self) -> Self {
        self.add_fails.store(true, Ordering::SeqCst);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn adds(&self) -> Vec<CatalogEntry> {
        self.adds.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogPort for FakeCatalog {
    fn kind(&self) -> CatalogKind {
        self.kind
    }

    fn service_name(&self) -> &str {
        &self.name
    }

    async fn search(&self, term: &str) -> CatalogResult<Vec<CatalogEntry>> {
        self.searches.lock().unwrap().push(term.to_string());
        match self.search.lock().unwrap().clone() {
            SearchOutcome::Results(results) => Ok(results),
            SearchOutcome::Unavailable => Err(CatalogError::Unavailable {
                service: self.name.clone(),
                message: "connection refused".to_string(),
            }),
        }
    }

    async fn add(&self, entry: &CatalogEntry) -> CatalogResult<()> {
        self.adds.lock().unwrap().push(entry.clone());
        if self.add_fails.load(Ordering::SeqCst) {
            Err(CatalogError::Configuration {
                message: "Root folder id 5 not found".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// `count` entries titled `Title 0`, `Title 1`, ...
pub fn numbered_entries(count: usize) -> Vec<CatalogEntry> {
    (0..count)
        .map(|i| {
            let id = i64::try_from(i).unwrap();
            let year = 2000 + i32::try_from(i).unwrap();
            CatalogEntry::new(format!("Title {i}"), 1000 + id).with_year(year)
        })
        .collect()
}

// ============================================================================
// Chat
// ============================================================================

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOp {
    SendText {
        message_id: i32,
        text: String,
        payloads: Vec<String>,
    },
    SendPhoto {
        message_id: i32,
        url: String,
        caption: String,
        payloads: Vec<String>,
    },
    EditText {
        message_id: i32,
        text: String,
        payloads: Vec<String>,
    },
    EditCaption {
        message_id: i32,
        caption: String,
        payloads: Vec<String>,
    },
    Delete {
        message_id: i32,
    },
    Answer {
        callback_id: String,
    },
}

impl ChatOp {
    /// Text or caption carried by this op.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::SendText { text, .. } | Self::EditText { text, .. } => Some(text),
            Self::SendPhoto { caption, .. } | Self::EditCaption { caption, .. } => Some(caption),
            Self::Delete { .. } | Self::Answer { .. } => None,
        }
    }

    /// Button payloads carried by this op.
    pub fn payloads(&self) -> &[String] {
        match self {
            Self::SendText { payloads, .. }
            | Self::SendPhoto { payloads, .. }
            | Self::EditText { payloads, .. }
            | Self::EditCaption { payloads, .. } => payloads,
            Self::Delete { .. } | Self::Answer { .. } => &[],
        }
    }
}

/// Recording chat transport with switchable failures.
pub struct FakeChat {
    ops: Mutex<Vec<ChatOp>>,
    next_id: AtomicI32,
    pub fail_send: AtomicBool,
    pub fail_photo: AtomicBool,
    pub fail_edit: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl Default for FakeChat {
    fn default() -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(100),
            fail_send: AtomicBool::new(false),
            fail_photo: AtomicBool::new(false),
            fail_edit: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }
}

fn payloads(keyboard: Option<&Keyboard>) -> Vec<String> {
    keyboard
        .map(|k| k.buttons().map(|b| b.payload.clone()).collect())
        .unwrap_or_default()
}

fn fail(flag: &AtomicBool, what: &str) -> ChatResult<()> {
    if flag.load(Ordering::SeqCst) {
        Err(ChatError::new(format!("{what} refused")))
    } else {
        Ok(())
    }
}

impl FakeChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<ChatOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// Every text and caption, in order.
    pub fn texts(&self) -> Vec<String> {
        self.ops()
            .iter()
            .filter_map(|op| op.text().map(str::to_string))
            .collect()
    }

    /// True when any text or caption contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Payloads of the most recent op that carried buttons.
    pub fn last_payloads(&self) -> Vec<String> {
        self.ops()
            .iter()
            .rev()
            .find(|op| !op.payloads().is_empty())
            .map(|op| op.payloads().to_vec())
            .unwrap_or_default()
    }

    /// The message the most recent buttons are attached to.
    pub fn last_keyboard_message(&self, chat_id: i64) -> Option<MessageRef> {
        self.ops().iter().rev().find_map(|op| match op {
            ChatOp::SendText {
                message_id,
                payloads,
                ..
            }
            | ChatOp::EditText {
                message_id,
                payloads,
                ..
            } if !payloads.is_empty() => Some(MessageRef::text(chat_id, *message_id)),
            ChatOp::SendPhoto {
                message_id,
                payloads,
                ..
            }
            | ChatOp::EditCaption {
                message_id,
                payloads,
                ..
            } if !payloads.is_empty() => Some(MessageRef::photo(chat_id, *message_id)),
            _ => None,
        })
    }

    fn record(&self, op: ChatOp) {
        self.ops.lock().unwrap().push(op);
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
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
        fail(&self.fail_send, "send")?;
        let message_id = self.next_id();
        self.record(ChatOp::SendText {
            message_id,
            text: text.to_string(),
            payloads: payloads(keyboard),
        });
        Ok(MessageRef::text(chat_id, message_id))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef> {
        fail(&self.fail_photo, "photo")?;
        let message_id = self.next_id();
        self.record(ChatOp::SendPhoto {
            message_id,
            url: photo_url.to_string(),
            caption: caption.to_string(),
            payloads: payloads(keyboard),
        });
        Ok(MessageRef::photo(chat_id, message_id))
    }

    async fn edit_text(
        &self,
        target: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<()> {
        fail(&self.fail_edit, "edit")?;
        self.record(ChatOp::EditText {
            message_id: target.message_id,
            text: text.to_string(),
            payloads: payloads(keyboard),
        });
        Ok(())
    }

    async fn edit_caption(
        &self,
        target: &MessageRef,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<()> {
        fail(&self.fail_edit, "edit")?;
        self.record(ChatOp::EditCaption {
            message_id: target.message_id,
            caption: caption.to_string(),
            payloads: payloads(keyboard),
        });
        Ok(())
    }

    async fn delete(&self, target: &MessageRef) -> ChatResult<()> {
        fail(&self.fail_delete, "delete")?;
        self.record(ChatOp::Delete {
            message_id: target.message_id,
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> ChatResult<()> {
        self.record(ChatOp::Answer {
            callback_id: callback_id.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Downloads
// ============================================================================

/// Download client returning a fixed list or an error.
pub struct FakeDownloads {
    pub transfers: Vec<Transfer>,
    pub fail: bool,
}

#[async_trait]
impl DownloadStatusPort for FakeDownloads {
    async fn list_transfers(&self) -> Result<Vec<Transfer>, DownloadStatusError> {
        if self.fail {
            Err(DownloadStatusError::Authentication {
                message: "Fails.".to_string(),
            })
        } else {
            Ok(self.transfers.clone())
        }
    }
}
