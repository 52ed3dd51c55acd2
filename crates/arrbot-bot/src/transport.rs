//! Telegram implementation of the chat port.
//!
//! Every body is sent with HTML parse mode. Passing no keyboard to an edit
//! clears the keyboard on the edited message.

use async_trait::async_trait;
use arrbot_core::{ChatError, ChatPort, ChatResult, Keyboard, MessageRef};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};
use url::Url;

/// Sends and edits messages through the Bot API.
#[derive(Clone)]
pub struct TelegramChat {
    bot: Bot,
}

impl TelegramChat {
    /// Wrap a bot handle.
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Convert a port keyboard to Telegram's inline markup.
pub fn inline_markup(keyboard: Option<&Keyboard>) -> InlineKeyboardMarkup {
    let rows = keyboard.map_or_else(Vec::new, |kb| {
        kb.rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.payload.clone()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

fn delivery_error(err: RequestError) -> ChatError {
    ChatError::new(err.to_string())
}

/// Editing to identical content is reported as an error by Telegram; the
/// message already shows what we wanted.
fn ignore_not_modified(result: Result<Message, RequestError>) -> ChatResult<()> {
    match result {
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(delivery_error(e)),
    }
}

#[async_trait]
impl ChatPort for TelegramChat {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html);
        if let Some(kb) = keyboard {
            request = request.reply_markup(inline_markup(Some(kb)));
        }
        let message = request.await.map_err(delivery_error)?;
        Ok(MessageRef::text(chat_id, message.id.0))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<MessageRef> {
        let url = Url::parse(photo_url)
            .map_err(|e| ChatError::new(format!("invalid photo URL '{photo_url}': {e}")))?;
        let mut request = self
            .bot
            .send_photo(ChatId(chat_id), InputFile::url(url))
            .caption(caption)
            .parse_mode(ParseMode::Html);
        if let Some(kb) = keyboard {
            request = request.reply_markup(inline_markup(Some(kb)));
        }
        let message = request.await.map_err(delivery_error)?;
        Ok(MessageRef::photo(chat_id, message.id.0))
    }

    async fn edit_text(
        &self,
        target: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<()> {
        let result = self
            .bot
            .edit_message_text(ChatId(target.chat_id), MessageId(target.message_id), text)
            .parse_mode(ParseMode::Html)
            .reply_markup(inline_markup(keyboard))
            .await;
        ignore_not_modified(result)
    }

    async fn edit_caption(
        &self,
        target: &MessageRef,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> ChatResult<()> {
        let result = self
            .bot
            .edit_message_caption(ChatId(target.chat_id), MessageId(target.message_id))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .reply_markup(inline_markup(keyboard))
            .await;
        ignore_not_modified(result)
    }

    async fn delete(&self, target: &MessageRef) -> ChatResult<()> {
        self.bot
            .delete_message(ChatId(target.chat_id), MessageId(target.message_id))
            .await
            .map(|_| ())
            .map_err(delivery_error)
    }

    async fn answer_callback(&self, callback_id: &str) -> ChatResult<()> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map(|_| ())
            .map_err(delivery_error)
    }
}
