//! Per-session conversation state.
//!
//! Each variant carries exactly the scratch data that is valid in it, so a
//! chosen entry outside confirmation, or results outside selection and
//! confirmation, cannot be represented.

use std::sync::Arc;

use crate::domain::{CatalogEntry, CatalogKind};

/// How many results are offered as buttons.
pub const MAX_SELECTABLE: usize = 10;

/// Position in the search-and-add flow.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationState {
    /// S0: waiting for Movie / Series.
    AwaitingKind,
    /// S1: waiting for a title to search for.
    AwaitingQuery {
        /// Catalog to search.
        kind: CatalogKind,
    },
    /// S2: results shown, waiting for a pick.
    AwaitingSelection {
        /// Catalog that was searched.
        kind: CatalogKind,
        /// Full result list in backend order.
        results: Arc<[CatalogEntry]>,
    },
    /// S3: detail shown, waiting for confirm / back / cancel.
    AwaitingConfirmation {
        /// Catalog that was searched.
        kind: CatalogKind,
        /// Full result list, kept for "back to results".
        results: Arc<[CatalogEntry]>,
        /// Index of the chosen entry in `results`.
        chosen: usize,
    },
}

/// Discriminant of [`ConversationState`], handy for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateTag {
    AwaitingKind,
    AwaitingQuery,
    AwaitingSelection,
    AwaitingConfirmation,
}

impl ConversationState {
    /// Which state this is.
    pub const fn tag(&self) -> StateTag {
        match self {
            Self::AwaitingKind => StateTag::AwaitingKind,
            Self::AwaitingQuery { .. } => StateTag::AwaitingQuery,
            Self::AwaitingSelection { .. } => StateTag::AwaitingSelection,
            Self::AwaitingConfirmation { .. } => StateTag::AwaitingConfirmation,
        }
    }

    /// Selected catalog, if one has been picked.
    pub const fn kind(&self) -> Option<CatalogKind> {
        match self {
            Self::AwaitingKind => None,
            Self::AwaitingQuery { kind }
            | Self::AwaitingSelection { kind, .. }
            | Self::AwaitingConfirmation { kind, .. } => Some(*kind),
        }
    }

    /// Cached search results; empty outside S2 and S3.
    pub fn search_results(&self) -> &[CatalogEntry] {
        match self {
            Self::AwaitingSelection { results, .. }
            | Self::AwaitingConfirmation { results, .. } => {
                results
            }
            _ => &[],
        }
    }

    /// The entry awaiting confirmation, in S3 only.
    pub fn chosen_entry(&self) -> Option<&CatalogEntry> {
        match self {
            Self::AwaitingConfirmation {
                results, chosen, ..
            } => results.get(*chosen),
            _ => None,
        }
    }
}

/// One user's conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Current position in the flow.
    pub state: ConversationState,
    /// Replaced on every return to S0; embedded in button payloads.
    pub generation: u64,
}

impl Session {
    /// A fresh session in S0.
    pub const fn new(generation: u64) -> Self {
        Self {
            state: ConversationState::AwaitingKind,
            generation,
        }
    }

    /// Back to S0 with all scratch data dropped, under a new generation.
    pub fn restart(&mut self, generation: u64) {
        self.state = ConversationState::AwaitingKind;
        self.generation = generation;
    }
}

/// Number of results offered as buttons for a list of `total`.
pub fn selectable_count(total: usize) -> usize {
    total.min(MAX_SELECTABLE)
}
