//! Button payload codec.
//!
//! Payloads look like `"{generation}:{action}"`, e.g. `"12:pick:3"`. The
//! transport hands them back verbatim, so parsing is strict: digits only,
//! known action words, nothing trailing.

use std::fmt;

use thiserror::Error;

use crate::domain::CatalogKind;

/// Telegram rejects callback data longer than this.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// What a button asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Pick movie or series in S0.
    Kind(CatalogKind),
    /// Pick a search result by index in S2.
    Pick(usize),
    /// Confirm the add in S3.
    Confirm,
    /// Go from S3 back to the cached result list.
    BackToResults,
    /// Abandon the search from S3.
    CancelSearch,
    /// Generic cancel button.
    Cancel,
}

/// A decoded button payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callback {
    /// Session generation the button was rendered for.
    pub generation: u64,
    /// Requested action.
    pub action: CallbackAction,
}

/// Why a payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackParseError {
    #[error("payload is empty or too long")]
    BadLength,
    #[error("missing or non-numeric generation")]
    BadGeneration,
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("malformed index '{0}'")]
    BadIndex(String),
}

impl Callback {
    /// Build a payload for `action` in `generation`.
    pub const fn new(generation: u64, action: CallbackAction) -> Self {
        Self { generation, action }
    }

    /// Parse a payload string.
    pub fn parse(payload: &str) -> Result<Self, CallbackParseError> {
        if payload.is_empty() || payload.len() > MAX_PAYLOAD_LEN {
            return Err(CallbackParseError::BadLength);
        }

        let (generation, action) = payload
            .split_once(':')
            .ok_or(CallbackParseError::BadGeneration)?;
        let generation =
            parse_digits::<u64>(generation, 20).ok_or(CallbackParseError::BadGeneration)?;

        let action = match action.split_once(':') {
            Some(("kind", kind)) => CatalogKind::from_token(kind)
                .map(CallbackAction::Kind)
                .ok_or_else(|| CallbackParseError::UnknownAction(action.to_string()))?,
            Some(("pick", index)) => parse_digits::<usize>(index, 3)
                .map(CallbackAction::Pick)
                .ok_or_else(|| CallbackParseError::BadIndex(index.to_string()))?,
            Some(_) => return Err(CallbackParseError::UnknownAction(action.to_string())),
            None => match action {
                "confirm" => CallbackAction::Confirm,
                "back" => CallbackAction::BackToResults,
                "cancel_search" => CallbackAction::CancelSearch,
                "cancel" => CallbackAction::Cancel,
                other => return Err(CallbackParseError::UnknownAction(other.to_string())),
            },
        };

        Ok(Self { generation, action })
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.generation)?;
        match self.action {
            CallbackAction::Kind(kind) => write!(f, "kind:{}", kind.token()),
            CallbackAction::Pick(index) => write!(f, "pick:{index}"),
            CallbackAction::Confirm => f.write_str("confirm"),
            CallbackAction::BackToResults => f.write_str("back"),
            CallbackAction::CancelSearch => f.write_str("cancel_search"),
            CallbackAction::Cancel => f.write_str("cancel"),
        }
    }
}

/// Parse a run of ASCII digits, at most `max_len` long.
fn parse_digits<T: std::str::FromStr>(s: &str, max_len: usize) -> Option<T> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
