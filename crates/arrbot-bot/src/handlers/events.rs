//! Conversion from Telegram updates to core events.

use arrbot_core::{CallbackInput, ChatUser, InboundEvent, MessageRef};
use teloxide::types::{CallbackQuery, Message, User};

#[allow(clippy::cast_possible_wrap)]
const fn user_id(user: &User) -> i64 {
    user.id.0 as i64
}

/// Sender of a message; `None` for channel posts.
pub fn message_user(msg: &Message) -> Option<ChatUser> {
    let from = msg.from.as_ref()?;
    Some(ChatUser::new(user_id(from), msg.chat.id.0, from.first_name.clone()))
}

/// Presser of a button. Falls back to the private chat when the message is
/// no longer known.
pub fn callback_user(query: &CallbackQuery) -> ChatUser {
    let user_id = user_id(&query.from);
    let chat_id = query
        .message
        .as_ref()
        .map_or(user_id, |message| message.chat().id.0);
    ChatUser::new(user_id, chat_id, query.from.first_name.clone())
}

/// The press itself, with the message the button was attached to.
pub fn callback_input(query: &CallbackQuery) -> CallbackInput {
    let message = query.message.as_ref().map(|message| {
        let chat_id = message.chat().id.0;
        let message_id = message.id().0;
        if message.regular_message().is_some_and(|m| m.photo().is_some()) {
            MessageRef::photo(chat_id, message_id)
        } else {
            MessageRef::text(chat_id, message_id)
        }
    });
    CallbackInput {
        id: query.id.clone(),
        payload: query.data.clone().unwrap_or_default(),
        message,
    }
}

/// Text that did not parse as a known command.
///
/// `None` for a command addressed to another bot (`/start@otherbot`); a
/// command addressed to us has the `@botname` suffix stripped.
pub fn text_event(text: &str, bot_username: Option<&str>) -> Option<InboundEvent> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Some(InboundEvent::Text(text.to_string()));
    }

    let word = trimmed.split_whitespace().next().unwrap_or(trimmed);
    match word.split_once('@') {
        Some((command, addressee)) => {
            let ours = bot_username.is_some_and(|name| name.eq_ignore_ascii_case(addressee));
            ours.then(|| InboundEvent::UnknownCommand(command.to_string()))
        }
        None => Some(InboundEvent::UnknownCommand(word.to_string())),
    }
}
