//! Keyed store of conversation sessions.
//!
//! Each key owns one async mutex. A handler holds it for the whole
//! transition, backend calls included, so events for one session never
//! interleave while different sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::state::Session;

/// Identifies one user's conversation in one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    /// Chat the conversation happens in.
    pub chat_id: i64,
    /// User driving it.
    pub user_id: i64,
}

impl SessionKey {
    /// Build a key.
    pub const fn new(chat_id: i64, user_id: i64) -> Self {
        Self { chat_id, user_id }
    }
}

/// Exclusive access to one session slot. `None` means no conversation.
pub type SessionGuard = OwnedMutexGuard<Option<Session>>;

/// Concurrent map from [`SessionKey`] to session slot.
///
/// Slots are created on first access. Clearing a session sets its slot to
/// `None` under the slot lock; [`SessionStore::release`] then drops empty
/// slots nobody else holds, so the map only keeps live conversations and
/// slots in use.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<SessionKey, Arc<Mutex<Option<Session>>>>>,
    generations: AtomicU64,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A generation number never handed out before by this store.
    pub fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Lock the slot for `key`, creating it on first use.
    pub async fn lock(&self, key: SessionKey) -> SessionGuard {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(key).or_default())
        };
        slot.lock_owned().await
    }

    /// End the conversation for `key`, if any. Returns whether one existed.
    pub async fn clear(&self, key: SessionKey) -> bool {
        let slot = {
            let slots = self.slots.lock().await;
            slots.get(&key).cloned()
        };
        let existed = match slot {
            Some(slot) => slot.lock().await.take().is_some(),
            None => false,
        };
        self.release(key).await;
        existed
    }

    /// Drop the slot for `key` when it is empty and no handler holds or
    /// waits on it.
    ///
    /// Handles are only cloned under the map lock, so a strong count of one
    /// seen under that lock cannot grow until it is released.
    pub async fn release(&self, key: SessionKey) {
        let mut slots = self.slots.lock().await;
        let idle = slots.get(&key).is_some_and(|slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().is_ok_and(|guard| guard.is_none())
        });
        if idle {
            slots.remove(&key);
        }
    }

    /// Number of slots currently in the map, live or not.
    pub async fn slot_count(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Copy of the current session for `key`, without creating a slot.
    pub async fn snapshot(&self, key: SessionKey) -> Option<Session> {
        let slot = {
            let slots = self.slots.lock().await;
            slots.get(&key).cloned()
        }?;
        let guard = slot.lock().await;
        guard.clone()
    }

    /// Number of keys that currently have a live conversation.
    pub async fn active_count(&self) -> usize {
        let slots: Vec<_> = self.slots.lock().await.values().cloned().collect();
        let mut active = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                active += 1;
            }
        }
        active
    }
}
