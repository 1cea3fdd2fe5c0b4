//! In-process staleness window cache.
//!
//! Entries are fresh for `ttl` after insertion. After that they are still
//! served, and the first reader to see a stale entry is told to refresh it.
//! Later readers keep getting the stale value until the refresh lands.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Outcome of a cache lookup.
#[derive(Debug)]
pub(crate) enum Lookup<V> {
    /// Within the staleness window.
    Fresh(Arc<V>),
    /// Past the window. `refresh` is true for exactly one caller per
    /// staleness period, who must then call `insert`, `remove` or `release`.
    Stale { value: Arc<V>, refresh: bool },
    Miss,
}

#[derive(Debug)]
struct Slot<V> {
    value: Arc<V>,
    stored_at: Instant,
    refreshing: bool,
}

/// Keyed cache with a fixed staleness window.
///
/// A zero window disables the cache: lookups always miss and inserts are
/// dropped.
#[derive(Debug)]
pub(crate) struct StaleCache<V> {
    ttl: Duration,
    slots: RwLock<HashMap<String, Slot<V>>>,
}

impl<V> StaleCache<V> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Look up `key`, claiming the refresh if the entry is stale.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn lookup(&self, key: &str) -> Lookup<V> {
        if !self.is_enabled() {
            return Lookup::Miss;
        }

        {
            let slots = self.slots.read().unwrap();
            match slots.get(key) {
                None => return Lookup::Miss,
                Some(slot) if slot.stored_at.elapsed() < self.ttl => {
                    return Lookup::Fresh(Arc::clone(&slot.value));
                }
                Some(slot) if slot.refreshing => {
                    return Lookup::Stale {
                        value: Arc::clone(&slot.value),
                        refresh: false,
                    };
                }
                Some(_) => {}
            }
        }

        // Stale with no refresh in flight: recheck under the write lock.
        let mut slots = self.slots.write().unwrap();
        match slots.get_mut(key) {
            None => Lookup::Miss,
            Some(slot) if slot.stored_at.elapsed() < self.ttl => {
                Lookup::Fresh(Arc::clone(&slot.value))
            }
            Some(slot) => {
                let refresh = !slot.refreshing;
                slot.refreshing = true;
                Lookup::Stale {
                    value: Arc::clone(&slot.value),
                    refresh,
                }
            }
        }
    }

    /// Store a value, starting a new staleness window.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn insert(&self, key: impl Into<String>, value: Arc<V>) {
        if !self.is_enabled() {
            return;
        }
        self.slots.write().unwrap().insert(
            key.into(),
            Slot {
                value,
                stored_at: Instant::now(),
                refreshing: false,
            },
        );
    }

    /// Drop the entry for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn remove(&self, key: &str) {
        self.slots.write().unwrap().remove(key);
    }

    /// Give up a claimed refresh, keeping the stale value.
    ///
    /// The next reader will claim the refresh again.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn release(&self, key: &str) {
        if let Some(slot) = self.slots.write().unwrap().get_mut(key) {
            slot.refreshing = false;
        }
    }

    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub(crate) fn clear(&self) {
        self.slots.write().unwrap().clear();
    }
}
