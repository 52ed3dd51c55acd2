//! Search-and-add conversations.
//!
//! ```text
//! S0 AwaitingKind ──kind──▶ S1 AwaitingQuery ──results──▶ S2 AwaitingSelection
//!      ▲                                                     │ pick      ▲ back
//!      └──── cancel / error / stale / add finished ──── S3 AwaitingConfirmation
//! ```
//!
//! [`ConversationService`] owns the sessions and applies one event at a
//! time per session. Screens are built in [`screens`] and displayed through
//! [`render_or_replace`].

mod callback;
mod machine;
mod render;
pub mod screens;
mod state;
mod store;

pub use callback::{Callback, CallbackAction, CallbackParseError, MAX_PAYLOAD_LEN};
pub use machine::{CallbackInput, ChatUser, ConversationService, InboundEvent};
pub use render::{Placement, Screen, render_or_replace};
pub use state::{ConversationState, MAX_SELECTABLE, Session, StateTag, selectable_count};
pub use store::{SessionGuard, SessionKey, SessionStore};
