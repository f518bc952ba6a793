//! One-shot flash attribute storage.
//!
//! Flash attributes live server-side for exactly one redirected request: a
//! redirect stashes them under an opaque token carried in an HttpOnly
//! cookie, and the next request that presents the token takes them out,
//! removing both the entry and the cookie. Entries whose cookie never comes
//! back are evicted oldest-first once the store is full.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::errors::{Error, Result};
use crate::handler::Attributes;

/// Name of the cookie carrying the flash token.
pub const FLASH_COOKIE: &str = "estoque_flash";

/// Pending entries kept at most; beyond this the oldest is dropped.
const MAX_PENDING: usize = 1024;

#[derive(Debug, Default)]
struct Pending {
    entries: HashMap<u64, Attributes>,
    order: VecDeque<u64>,
}

/// Server-side store for flash attributes awaiting their follow-up request.
#[derive(Debug, Default)]
pub struct FlashStore {
    pending: Mutex<Pending>,
    next_token: AtomicU64,
}

impl FlashStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stashes attributes for one follow-up request and returns the token
    /// to put in the cookie.
    pub fn stash(&self, attributes: Attributes) -> Result<u64> {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let mut pending = self.lock()?;
        if pending.order.len() >= MAX_PENDING {
            if let Some(evicted) = pending.order.pop_front() {
                pending.entries.remove(&evicted);
                warn!(evicted, "flash store full, dropped oldest entry");
            }
        }
        pending.order.push_back(token);
        pending.entries.insert(token, attributes);
        Ok(token)
    }

    /// Takes the attributes stashed under `token`, consuming them.
    ///
    /// Returns `None` for unknown or already-consumed tokens.
    pub fn take(&self, token: u64) -> Result<Option<Attributes>> {
        let mut pending = self.lock()?;
        let attributes = pending.entries.remove(&token);
        if attributes.is_some() {
            pending.order.retain(|t| *t != token);
        }
        Ok(attributes)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Pending>> {
        self.pending
            .lock()
            .map_err(|_| Error::Store("flash store mutex poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::handler::{FLASH_SUCCESS, Value};
    use crate::messages;

    fn success_attributes() -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(FLASH_SUCCESS, Value::Text(messages::SAVED));
        attributes
    }

    #[test]
    fn attributes_survive_exactly_one_take() {
        let store = FlashStore::new();
        let token = store.stash(success_attributes()).unwrap();

        let taken = store.take(token).unwrap().unwrap();
        assert_eq!(taken.text(FLASH_SUCCESS), Some(messages::SAVED));

        assert!(store.take(token).unwrap().is_none());
    }

    #[test]
    fn unknown_tokens_yield_nothing() {
        let store = FlashStore::new();
        assert!(store.take(12_345).unwrap().is_none());
    }

    #[test]
    fn tokens_are_unique_per_stash() {
        let store = FlashStore::new();
        let first = store.stash(success_attributes()).unwrap();
        let second = store.stash(success_attributes()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn overflow_evicts_the_oldest_entry() {
        let store = FlashStore::new();
        let oldest = store.stash(success_attributes()).unwrap();
        for _ in 0..MAX_PENDING {
            store.stash(success_attributes()).unwrap();
        }
        assert!(store.take(oldest).unwrap().is_none());
    }
}
