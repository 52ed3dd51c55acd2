//! The one place that puts conversation screens on the chat.
//!
//! Every display transition goes through [`render_or_replace`]. It walks a
//! fallback ladder so a failed edit or delete never leaves the user without
//! a message, and it never returns an error: delivery problems are logged
//! and the state machine carries on.

use crate::ports::{ChatPort, Keyboard, MessageRef};

/// What to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// HTML body, or the caption when `photo_url` is set.
    pub text: String,
    /// Inline buttons.
    pub keyboard: Option<Keyboard>,
    /// Poster to send as a photo with `text` as its caption.
    pub photo_url: Option<String>,
}

impl Screen {
    /// A plain text screen.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            photo_url: None,
        }
    }

    /// Attach buttons.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// Show as a photo, when a URL is available.
    #[must_use]
    pub fn with_photo(mut self, url: Option<String>) -> Self {
        self.photo_url = url;
        self
    }
}

/// Where a screen goes relative to the message the user interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Send a new message.
    Fresh,
    /// Edit `target`; on failure delete it and send, then just send.
    EditInPlace(MessageRef),
    /// Delete `target` and send; on failure edit it, then just send.
    Replace(MessageRef),
}

impl Placement {
    /// `EditInPlace` when the pressed message is known, `Fresh` otherwise.
    pub fn edit_or_fresh(target: Option<MessageRef>) -> Self {
        target.map_or(Self::Fresh, Self::EditInPlace)
    }

    /// `Replace` when the pressed message is known, `Fresh` otherwise.
    pub fn replace_or_fresh(target: Option<MessageRef>) -> Self {
        target.map_or(Self::Fresh, Self::Replace)
    }
}

/// Show `screen` in `chat_id` according to `placement`.
///
/// Returns the message now holding the screen, or `None` when every attempt
/// failed.
pub async fn render_or_replace(
    chat: &dyn ChatPort,
    chat_id: i64,
    placement: Placement,
    screen: &Screen,
) -> Option<MessageRef> {
    match placement {
        Placement::Fresh => send(chat, chat_id, screen).await,
        Placement::EditInPlace(target) => {
            if screen.photo_url.is_none() {
                match edit(chat, &target, screen).await {
                    Ok(()) => return Some(target),
                    Err(e) => {
                        tracing::debug!(
                            message_id = target.message_id,
                            error = %e,
                            "Edit failed, replacing message"
                        );
                    }
                }
            }
            if let Err(e) = chat.delete(&target).await {
                tracing::debug!(
                    message_id = target.message_id,
                    error = %e,
                    "Delete failed, sending new message"
                );
            }
            send(chat, chat_id, screen).await
        }
        Placement::Replace(target) => match chat.delete(&target).await {
            Ok(()) => send(chat, chat_id, screen).await,
            Err(e) => {
                tracing::debug!(
                    message_id = target.message_id,
                    error = %e,
                    "Delete failed, editing in place"
                );
                if screen.photo_url.is_none() && edit(chat, &target, screen).await.is_ok() {
                    return Some(target);
                }
                send(chat, chat_id, screen).await
            }
        },
    }
}

async fn edit(
    chat: &dyn ChatPort,
    target: &MessageRef,
    screen: &Screen,
) -> crate::ports::ChatResult<()> {
    let keyboard = screen.keyboard.as_ref();
    if target.has_media {
        chat.edit_caption(target, &screen.text, keyboard).await
    } else {
        chat.edit_text(target, &screen.text, keyboard).await
    }
}

async fn send(chat: &dyn ChatPort, chat_id: i64, screen: &Screen) -> Option<MessageRef> {
    let keyboard = screen.keyboard.as_ref();

    if let Some(url) = &screen.photo_url {
        match chat.send_photo(chat_id, url, &screen.text, keyboard).await {
            Ok(sent) => return Some(sent),
            Err(e) => {
                tracing::warn!(
                    chat_id,
                    photo_url = %url,
                    error = %e,
                    "Photo delivery failed, sending text instead"
                );
            }
        }
    }

    match chat.send_text(chat_id, &screen.text, keyboard).await {
        Ok(sent) => Some(sent),
        Err(e) => {
            tracing::warn!(chat_id, error = %e, "Message delivery failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Button, ChatError, ChatResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records calls as short strings; operations named in `failing` error.
    #[derive(Default)]
    struct LadderChat {
        calls: Mutex<Vec<String>>,
        failing: Vec<&'static str>,
    }

    impl LadderChat {
        fn failing(ops: &[&'static str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing: ops.to_vec(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn call(&self, op: &'static str, detail: String) -> ChatResult<()> {
            self.calls.lock().unwrap().push(format!("{op} {detail}"));
            if self.failing.contains(&op) {
                Err(ChatError::new(format!("{op} refused")))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ChatPort for LadderChat {
        async fn send_text(
            &self,
            chat_id: i64,
            _text: &str,
            _keyboard: Option<&Keyboard>,
        ) -> ChatResult<MessageRef> {
            self.call("send_text", chat_id.to_string())?;
            Ok(MessageRef::text(chat_id, 50))
        }

        async fn send_photo(
            &self,
            chat_id: i64,
            photo_url: &str,
            _caption: &str,
            _keyboard: Option<&Keyboard>,
        ) -> ChatResult<MessageRef> {
            self.call("send_photo", photo_url.to_string())?;
            Ok(MessageRef::photo(chat_id, 60))
        }

        async fn edit_text(
            &self,
            target: &MessageRef,
            _text: &str,
            _keyboard: Option<&Keyboard>,
        ) -> ChatResult<()> {
            self.call("edit_text", target.message_id.to_string())
        }

        async fn edit_caption(
            &self,
            target: &MessageRef,
            _caption: &str,
            _keyboard: Option<&Keyboard>,
        ) -> ChatResult<()> {
            self.call("edit_caption", target.message_id.to_string())
        }

        async fn delete(&self, target: &MessageRef) -> ChatResult<()> {
            self.call("delete", target.message_id.to_string())
        }

        async fn answer_callback(&self, callback_id: &str) -> ChatResult<()> {
            self.call("answer", callback_id.to_string())
        }
    }

    const CHAT: i64 = 9;

    fn target() -> MessageRef {
        MessageRef::text(CHAT, 7)
    }

    fn edit_target() -> Placement {
        Placement::EditInPlace(target())
    }

    fn screen() -> Screen {
        Screen::text("hello")
            .with_keyboard(Keyboard::new().single(Button::new("Cancel", "1:cancel")))
    }

    fn poster() -> Screen {
        screen().with_photo(Some("https://img/poster.jpg".to_string()))
    }

    #[tokio::test]
    async fn test_fresh_sends() {
        let chat = LadderChat::default();
        let shown = render_or_replace(&chat, CHAT, Placement::Fresh, &screen()).await;
        assert_eq!(shown, Some(MessageRef::text(CHAT, 50)));
        assert_eq!(chat.calls(), vec!["send_text 9"]);
    }

    #[tokio::test]
    async fn test_edit_in_place_edits() {
        let chat = LadderChat::default();
        let shown = render_or_replace(&chat, CHAT, edit_target(), &screen()).await;
        assert_eq!(shown, Some(target()));
        assert_eq!(chat.calls(), vec!["edit_text 7"]);
    }

    #[tokio::test]
    async fn test_edit_in_place_falls_back_to_delete_and_send() {
        let chat = LadderChat::failing(&["edit_text"]);
        let shown = render_or_replace(&chat, CHAT, edit_target(), &screen()).await;
        assert_eq!(shown, Some(MessageRef::text(CHAT, 50)));
        assert_eq!(chat.calls(), vec!["edit_text 7", "delete 7", "send_text 9"]);
    }

    #[tokio::test]
    async fn test_edit_in_place_sends_when_delete_also_fails() {
        let chat = LadderChat::failing(&["edit_text", "delete"]);
        let shown = render_or_replace(&chat, CHAT, edit_target(), &screen()).await;
        assert_eq!(shown, Some(MessageRef::text(CHAT, 50)));
        assert_eq!(chat.calls(), vec!["edit_text 7", "delete 7", "send_text 9"]);
    }

    #[tokio::test]
    async fn test_replace_deletes_then_sends() {
        let chat = LadderChat::default();
        let shown = render_or_replace(&chat, CHAT, Placement::Replace(target()), &screen()).await;
        assert_eq!(shown, Some(MessageRef::text(CHAT, 50)));
        assert_eq!(chat.calls(), vec!["delete 7", "send_text 9"]);
    }

    #[tokio::test]
    async fn test_replace_edits_when_delete_fails() {
        let chat = LadderChat::failing(&["delete"]);
        let shown = render_or_replace(&chat, CHAT, Placement::Replace(target()), &screen()).await;
        assert_eq!(shown, Some(target()));
        assert_eq!(chat.calls(), vec!["delete 7", "edit_text 7"]);
    }

    #[tokio::test]
    async fn test_replace_sends_when_delete_and_edit_fail() {
        let chat = LadderChat::failing(&["delete", "edit_text"]);
        let shown = render_or_replace(&chat, CHAT, Placement::Replace(target()), &screen()).await;
        assert_eq!(shown, Some(MessageRef::text(CHAT, 50)));
        assert_eq!(chat.calls(), vec!["delete 7", "edit_text 7", "send_text 9"]);
    }

    #[tokio::test]
    async fn test_photo_screen_is_never_edited_in() {
        let chat = LadderChat::default();
        let shown = render_or_replace(&chat, CHAT, edit_target(), &poster()).await;
        assert_eq!(shown, Some(MessageRef::photo(CHAT, 60)));
        assert_eq!(chat.calls(), vec!["delete 7", "send_photo https://img/poster.jpg"]);

        let chat = LadderChat::failing(&["delete"]);
        let shown = render_or_replace(&chat, CHAT, Placement::Replace(target()), &poster()).await;
        assert_eq!(shown, Some(MessageRef::photo(CHAT, 60)));
        assert_eq!(chat.calls(), vec!["delete 7", "send_photo https://img/poster.jpg"]);
    }

    #[tokio::test]
    async fn test_media_target_edits_caption() {
        let chat = LadderChat::default();
        let photo = MessageRef::photo(CHAT, 8);
        let shown = render_or_replace(&chat, CHAT, Placement::EditInPlace(photo), &screen()).await;
        assert_eq!(shown, Some(photo));
        assert_eq!(chat.calls(), vec!["edit_caption 8"]);

        let chat = LadderChat::failing(&["delete"]);
        render_or_replace(&chat, CHAT, Placement::Replace(photo), &screen()).await;
        assert_eq!(chat.calls(), vec!["delete 8", "edit_caption 8"]);
    }

    #[tokio::test]
    async fn test_failed_photo_falls_back_to_text() {
        let chat = LadderChat::failing(&["send_photo"]);
        let shown = render_or_replace(&chat, CHAT, Placement::Fresh, &poster()).await;
        assert_eq!(shown, Some(MessageRef::text(CHAT, 50)));
        assert_eq!(chat.calls(), vec!["send_photo https://img/poster.jpg", "send_text 9"]);
    }

    #[tokio::test]
    async fn test_nothing_shown_when_every_step_fails() {
        let chat = LadderChat::failing(&["edit_text", "delete", "send_text"]);
        let shown = render_or_replace(&chat, CHAT, edit_target(), &screen()).await;
        assert_eq!(shown, None);
        assert_eq!(chat.calls(), vec!["edit_text 7", "delete 7", "send_text 9"]);
    }
}
