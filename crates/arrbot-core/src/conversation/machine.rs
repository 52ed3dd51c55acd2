//! The conversation state machine.
//!
//! One call to [`ConversationService::handle`] is one transition. The
//! session lock is held for the whole call, backend requests included.

use std::sync::Arc;

use super::callback::{Callback, CallbackAction};
use super::render::{Placement, Screen, render_or_replace};
use super::screens::{self, KindPrompt};
use super::state::{ConversationState, Session, selectable_count};
use super::store::{SessionKey, SessionStore};
use crate::access::AllowList;
use crate::domain::{CatalogEntry, CatalogKind};
use crate::ports::{Catalogs, ChatPort, MessageRef};
use crate::utils::mention_html;

/// Who sent an event, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Telegram user id.
    pub user_id: i64,
    /// Chat the event came from.
    pub chat_id: i64,
    /// First name, used in the greeting.
    pub display_name: String,
}

impl ChatUser {
    /// Build a user.
    pub fn new(user_id: i64, chat_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id,
            display_name: display_name.into(),
        }
    }

    /// Session key for this user in this chat.
    pub const fn key(&self) -> SessionKey {
        SessionKey::new(self.chat_id, self.user_id)
    }
}

/// A button press as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackInput {
    /// Transport id used to acknowledge the press.
    pub id: String,
    /// Raw payload string.
    pub payload: String,
    /// Message the button was attached to, when still accessible.
    pub message: Option<MessageRef>,
}

/// Everything the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// `/start`
    Start,
    /// `/cancel`
    Cancel,
    /// A slash command the bot does not know.
    UnknownCommand(String),
    /// Any other text message.
    Text(String),
    /// A message without text (sticker, photo, voice note, ...).
    NonText,
    /// A button press.
    Callback(CallbackInput),
}

/// Drives search-and-add conversations.
pub struct ConversationService {
    catalogs: Catalogs,
    chat: Arc<dyn ChatPort>,
    allow_list: Arc<AllowList>,
    sessions: SessionStore,
}

impl ConversationService {
    /// Create a service with an empty session store.
    pub fn new(catalogs: Catalogs, chat: Arc<dyn ChatPort>, allow_list: Arc<AllowList>) -> Self {
        Self {
            catalogs,
            chat,
            allow_list,
            sessions: SessionStore::new(),
        }
    }

    /// The session store, for inspection.
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Copy of the current session for `key`.
    pub async fn session(&self, key: SessionKey) -> Option<Session> {
        self.sessions.snapshot(key).await
    }

    /// Apply one inbound event.
    pub async fn handle(&self, user: &ChatUser, event: InboundEvent) {
        if let InboundEvent::Callback(callback) = &event {
            if let Err(e) = self.chat.answer_callback(&callback.id).await {
                tracing::debug!(
                    user_id = user.user_id,
                    error = %e,
                    "Failed to acknowledge button press"
                );
            }
        }

        if !self.allow_list.is_allowed(user.user_id) {
            self.deny(user).await;
            return;
        }

        let mut slot = self.sessions.lock(user.key()).await;
        match event {
            InboundEvent::Start => self.start(user, &mut slot).await,
            InboundEvent::Cancel => self.cancel(user, &mut slot).await,
            InboundEvent::UnknownCommand(command) => {
                tracing::info!(user_id = user.user_id, command = %command, "Unknown command");
                self.recover(user, &mut slot, Placement::Fresh, screens::UNKNOWN_COMMAND_TEXT)
                    .await;
            }
            InboundEvent::Text(text) => self.on_text(user, &mut slot, &text).await,
            InboundEvent::NonText => self.on_non_text(user, &mut slot).await,
            InboundEvent::Callback(callback) => self.on_callback(user, &mut slot, callback).await,
        }
        drop(slot);
        self.sessions.release(user.key()).await;
    }

    // ========================================================================
    // Commands
    // ========================================================================

    async fn deny(&self, user: &ChatUser) {
        tracing::warn!(user_id = user.user_id, chat_id = user.chat_id, "Unauthorized user");
        if self.sessions.clear(user.key()).await {
            tracing::info!(user_id = user.user_id, "Session ended after authorization failure");
        }
        self.show(user, Placement::Fresh, &Screen::text(screens::UNAUTHORIZED_TEXT))
            .await;
    }

    async fn start(&self, user: &ChatUser, slot: &mut Option<Session>) {
        let generation = self.sessions.next_generation();
        *slot = Some(Session::new(generation));
        tracing::info!(user_id = user.user_id, generation, "Conversation started");

        let mention = mention_html(user.user_id, &user.display_name);
        self.show(
            user,
            Placement::Fresh,
            &screens::kind_prompt(generation, &KindPrompt::Greeting(mention)),
        )
        .await;
    }

    async fn cancel(&self, user: &ChatUser, slot: &mut Option<Session>) {
        if slot.take().is_some() {
            tracing::info!(user_id = user.user_id, "Conversation cancelled");
        }
        self.show(user, Placement::Fresh, &Screen::text(screens::CANCELLED_TEXT))
            .await;
    }

    // ========================================================================
    // Text input
    // ========================================================================

    async fn on_text(&self, user: &ChatUser, slot: &mut Option<Session>, text: &str) {
        let Some(session) = slot.as_ref() else {
            self.show(user, Placement::Fresh, &Screen::text(screens::NO_SESSION_HINT))
                .await;
            return;
        };

        match session.state {
            ConversationState::AwaitingQuery { kind } => {
                let generation = session.generation;
                self.search(user, slot, generation, kind, text).await;
            }
            _ => {
                tracing::info!(
                    user_id = user.user_id,
                    state = ?session.state.tag(),
                    "Unexpected text message"
                );
                self.recover(user, slot, Placement::Fresh, screens::RECOVERY_TEXT)
                    .await;
            }
        }
    }

    /// A query prompt is repeated; any other state recovers. Without a
    /// conversation the message is ignored.
    async fn on_non_text(&self, user: &ChatUser, slot: &mut Option<Session>) {
        let Some(session) = slot.as_ref() else {
            tracing::debug!(
                user_id = user.user_id,
                "Ignoring non-text message outside a conversation"
            );
            return;
        };

        match session.state {
            ConversationState::AwaitingQuery { kind } => {
                let generation = session.generation;
                self.show(
                    user,
                    Placement::Fresh,
                    &screens::empty_query_prompt(generation, kind),
                )
                .await;
            }
            _ => {
                tracing::info!(
                    user_id = user.user_id,
                    state = ?session.state.tag(),
                    "Unexpected non-text message"
                );
                self.recover(user, slot, Placement::Fresh, screens::RECOVERY_TEXT)
                    .await;
            }
        }
    }

    async fn search(
        &self,
        user: &ChatUser,
        slot: &mut Option<Session>,
        generation: u64,
        kind: CatalogKind,
        text: &str,
    ) {
        let query = text.trim();
        if query.is_empty() {
            self.show(
                user,
                Placement::Fresh,
                &screens::empty_query_prompt(generation, kind),
            )
            .await;
            return;
        }

        let catalog = self.catalogs.get(kind);
        let service = catalog.service_name();
        let status = self
            .show(
                user,
                Placement::Fresh,
                &screens::searching_notice(service, kind, query),
            )
            .await;
        let placement = Placement::edit_or_fresh(status);

        match catalog.search(query).await {
            Err(e) => {
                tracing::warn!(user_id = user.user_id, service, query, error = %e, "Search failed");
                self.show(user, placement, &screens::unavailable_notice(service))
                    .await;
                self.restart(user, slot, Placement::Fresh, KindPrompt::Restart)
                    .await;
            }
            Ok(results) if results.is_empty() => {
                tracing::info!(
                    user_id = user.user_id,
                    service,
                    query,
                    "Search returned no results"
                );
                self.show(user, placement, &Screen::text(screens::NO_RESULTS_TEXT))
                    .await;
                self.restart(user, slot, Placement::Fresh, KindPrompt::Restart)
                    .await;
            }
            Ok(results) => {
                tracing::info!(
                    user_id = user.user_id,
                    service,
                    query,
                    count = results.len(),
                    "Search returned results"
                );
                let results: Arc<[CatalogEntry]> = results.into();
                let screen = screens::results_screen(generation, &results);
                set_state(slot, ConversationState::AwaitingSelection { kind, results });
                self.show(user, placement, &screen).await;
            }
        }
    }

    // ========================================================================
    // Button presses
    // ========================================================================

    /// Only a press carrying the presser's own generation may touch the
    /// pressed message; in a group it may belong to someone else's session.
    async fn on_callback(&self, user: &ChatUser, slot: &mut Option<Session>, input: CallbackInput) {
        let target = input.message;

        let callback = match Callback::parse(&input.payload) {
            Ok(callback) => callback,
            Err(e) => {
                tracing::info!(
                    user_id = user.user_id,
                    payload = %input.payload,
                    error = %e,
                    "Malformed button payload"
                );
                self.recover(user, slot, Placement::Fresh, screens::RECOVERY_TEXT)
                    .await;
                return;
            }
        };

        let Some(session) = slot.as_ref() else {
            tracing::info!(user_id = user.user_id, "Button press without a conversation");
            self.recover(user, slot, Placement::Fresh, screens::RECOVERY_TEXT)
                .await;
            return;
        };

        if callback.generation != session.generation {
            tracing::info!(
                user_id = user.user_id,
                pressed = callback.generation,
                current = session.generation,
                "Stale button press"
            );
            self.recover(user, slot, Placement::Fresh, screens::RECOVERY_TEXT)
                .await;
            return;
        }

        let generation = session.generation;
        match (session.state.clone(), callback.action) {
            (_, CallbackAction::Cancel) => {
                self.restart(user, slot, Placement::edit_or_fresh(target), KindPrompt::Restart)
                    .await;
            }
            (ConversationState::AwaitingConfirmation { .. }, CallbackAction::CancelSearch) => {
                self.restart(user, slot, Placement::replace_or_fresh(target), KindPrompt::Restart)
                    .await;
            }
            (ConversationState::AwaitingKind, CallbackAction::Kind(kind)) => {
                tracing::debug!(user_id = user.user_id, %kind, "Catalog kind selected");
                set_state(slot, ConversationState::AwaitingQuery { kind });
                self.show(
                    user,
                    Placement::edit_or_fresh(target),
                    &screens::query_prompt(generation, kind),
                )
                .await;
            }
            (ConversationState::AwaitingSelection { kind, results }, CallbackAction::Pick(index))
                if index < selectable_count(results.len()) =>
            {
                let screen = screens::detail_screen(generation, &results[index]);
                set_state(
                    slot,
                    ConversationState::AwaitingConfirmation {
                        kind,
                        results,
                        chosen: index,
                    },
                );
                self.show(user, Placement::replace_or_fresh(target), &screen)
                    .await;
            }
            (
                ConversationState::AwaitingConfirmation { kind, results, .. },
                CallbackAction::BackToResults,
            ) => {
                let screen = screens::results_screen(generation, &results);
                set_state(slot, ConversationState::AwaitingSelection { kind, results });
                self.show(user, Placement::replace_or_fresh(target), &screen)
                    .await;
            }
            (
                ConversationState::AwaitingConfirmation {
                    kind,
                    results,
                    chosen,
                },
                CallbackAction::Confirm,
            ) => match results.get(chosen) {
                Some(entry) => self.confirm_add(user, slot, target, kind, entry).await,
                None => {
                    let placement = Placement::edit_or_fresh(target);
                    self.recover(user, slot, placement, screens::RECOVERY_TEXT)
                        .await;
                }
            },
            (state, action) => {
                tracing::info!(
                    user_id = user.user_id,
                    state = ?state.tag(),
                    ?action,
                    "Button does not match conversation state"
                );
                self.recover(user, slot, Placement::edit_or_fresh(target), screens::RECOVERY_TEXT)
                    .await;
            }
        }
    }

    async fn confirm_add(
        &self,
        user: &ChatUser,
        slot: &mut Option<Session>,
        target: Option<MessageRef>,
        kind: CatalogKind,
        entry: &CatalogEntry,
    ) {
        let catalog = self.catalogs.get(kind);
        let service = catalog.service_name();

        let status = self
            .show(
                user,
                Placement::edit_or_fresh(target),
                &screens::adding_notice(service, entry),
            )
            .await;

        let success = match catalog.add(entry).await {
            Ok(()) => {
                tracing::info!(
                    user_id = user.user_id,
                    service,
                    title = %entry.title,
                    external_id = entry.external_id,
                    "Added to library"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    user_id = user.user_id,
                    service,
                    title = %entry.title,
                    external_id = entry.external_id,
                    error = %e,
                    "Add failed"
                );
                false
            }
        };

        self.show(
            user,
            Placement::edit_or_fresh(status),
            &screens::add_outcome(entry, success),
        )
        .await;
        self.restart(user, slot, Placement::Fresh, KindPrompt::Next)
            .await;
    }

    // ========================================================================
    // Restart and recovery
    // ========================================================================

    /// Back to S0 with cleared scratch data and a fresh prompt.
    async fn restart(
        &self,
        user: &ChatUser,
        slot: &mut Option<Session>,
        placement: Placement,
        prompt: KindPrompt,
    ) {
        let generation = self.sessions.next_generation();
        match slot {
            Some(session) => session.restart(generation),
            None => *slot = Some(Session::new(generation)),
        }
        self.show(user, placement, &screens::kind_prompt(generation, &prompt))
            .await;
    }

    /// Show `notice`, then restart.
    async fn recover(
        &self,
        user: &ChatUser,
        slot: &mut Option<Session>,
        placement: Placement,
        notice: &str,
    ) {
        self.show(user, placement, &Screen::text(notice)).await;
        self.restart(user, slot, Placement::Fresh, KindPrompt::Restart)
            .await;
    }

    async fn show(
        &self,
        user: &ChatUser,
        placement: Placement,
        screen: &Screen,
    ) -> Option<MessageRef> {
        render_or_replace(self.chat.as_ref(), user.chat_id, placement, screen).await
    }
}

impl std::fmt::Debug for ConversationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationService")
            .field("catalogs", &self.catalogs)
            .field("allow_list", &self.allow_list)
            .finish_non_exhaustive()
    }
}

fn set_state(slot: &mut Option<Session>, state: ConversationState) {
    if let Some(session) = slot {
        session.state = state;
    }
}
