//! Chat transport port.
//!
//! Message bodies are HTML (the transport sends them with HTML parse
//! mode); button labels are plain text.

use async_trait::async_trait;
use thiserror::Error;

/// A message the bot has sent and may later edit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    /// Chat the message lives in.
    pub chat_id: i64,
    /// Transport message id.
    pub message_id: i32,
    /// True when the message is a photo, so edits must target the caption.
    pub has_media: bool,
}

impl MessageRef {
    /// Reference a plain text message.
    pub const fn text(chat_id: i64, message_id: i32) -> Self {
        Self {
            chat_id,
            message_id,
            has_media: false,
        }
    }

    /// Reference a photo message.
    pub const fn photo(chat_id: i64, message_id: i32) -> Self {
        Self {
            chat_id,
            message_id,
            has_media: true,
        }
    }
}

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Text shown on the button.
    pub label: String,
    /// Opaque payload delivered back when pressed.
    pub payload: String,
}

impl Button {
    /// Create a callback button.
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An inline keyboard: rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Start an empty keyboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    #[must_use]
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        if !buttons.is_empty() {
            self.rows.push(buttons);
        }
        self
    }

    /// Append a row holding a single button.
    #[must_use]
    pub fn single(self, button: Button) -> Self {
        self.row(vec![button])
    }

    /// The keyboard rows.
    pub fn rows(&self) -> &[Vec<Button>] {
        &self.rows
    }

    /// All buttons, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// True when there are no buttons at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The transport refused or failed to deliver something.
#[derive(Debug, Clone, Error)]
#[error("Delivery failed: {message}")]
pub struct ChatError {
    /// Transport error text.
    pub message: String,
}

impl ChatError {
    /// Wrap a transport error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias for transport operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Outbound side of the chat platform.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Send a text message.
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef>;

    /// Send a photo by URL with a caption.
    async fn send_photo(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef>;

    /// Replace the text of a text message. `None` removes its keyboard.
    async fn edit_text(
        &self,
        target: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<()>;

    /// Replace the caption of a photo message. `None` removes its keyboard.
    async fn edit_caption(
        &self,
        target: &MessageRef,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<()>;

    /// Delete a message.
    async fn delete(&self, target: &MessageRef) -> ChatResult<()>;

    /// Acknowledge a button press so the client stops its spinner.
    async fn answer_callback(&self, callback_id: &str) -> ChatResult<()>;
}
