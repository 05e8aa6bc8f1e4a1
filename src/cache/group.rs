//! Group Module
//!
//! A single cache partition: a map of expiring entries with its own TTL
//! policy and optional fill function, behind its own lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, FillFn};

// == Group ==
/// Thread-safe get-or-fill map of expiring values.
///
/// The lock is held only around map access. The fill function always runs
/// unlocked, so two callers missing on the same key may both run it; the
/// later write wins.
#[derive(Debug)]
pub struct Group<V> {
    inner: Mutex<GroupInner<V>>,
}

#[derive(Debug)]
struct GroupInner<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Loader invoked on a miss
    fill: Option<FillFn<V>>,
    /// TTL applied when a value is written, ZERO = never expires
    expiration: Duration,
}

impl<V> GroupInner<V> {
    /// Drops the entry for `key` if it is still expired.
    ///
    /// A fresh value written by another caller in the meantime is kept.
    fn remove_stale(&mut self, key: &str, now: Instant) {
        if self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now))
        {
            self.entries.remove(key);
            debug!(key, "removed expired entry");
        }
    }
}

impl<V: Clone> Group<V> {
    // == Constructor ==
    /// Creates an empty group.
    ///
    /// # Arguments
    /// * `expiration` - TTL applied to written values, zero = never expires
    /// * `fill` - Optional loader invoked on a miss
    pub fn new(expiration: Duration, fill: Option<FillFn<V>>) -> Self {
        Self {
            inner: Mutex::new(GroupInner {
                entries: HashMap::new(),
                fill,
                expiration,
            }),
        }
    }

    // == Get ==
    /// Retrieves a value by key, filling it on a miss.
    ///
    /// Returns the value if present and unexpired. Otherwise runs the fill
    /// function, if any, and stores what it returns under the expiration
    /// policy current at write time. Expired entries that cannot be refilled
    /// are removed.
    pub fn get(&self, key: &str) -> Option<V> {
        let fill = {
            let mut inner = self.inner.lock();
            let now = Instant::now();

            if let Some(entry) = inner.entries.get(key) {
                if !entry.is_expired_at(now) {
                    trace!(key, "cache hit");
                    return Some(entry.value.clone());
                }
            }

            match inner.fill.clone() {
                Some(fill) => fill,
                None => {
                    inner.remove_stale(key, now);
                    return None;
                }
            }
        };

        debug!(key, "cache miss, invoking fill function");
        let filled = fill.call(key);

        let mut inner = self.inner.lock();
        match filled {
            Some(value) => {
                let entry = CacheEntry::new(value.clone(), inner.expiration);
                inner.entries.insert(key.to_string(), entry);
                Some(value)
            }
            None => {
                debug!(key, "fill function reported not found");
                inner.remove_stale(key, Instant::now());
                None
            }
        }
    }

    // == Set ==
    /// Stores a value, overwriting any existing entry and its expiry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let mut inner = self.inner.lock();
        let entry = CacheEntry::new(value, inner.expiration);
        inner.entries.insert(key.into(), entry);
    }
}

impl<V> Group<V> {
    // == Delete ==
    /// Removes an entry by key. Deleting an absent key is a no-op.
    pub fn del(&self, key: &str) {
        self.inner.lock().entries.remove(key);
    }

    // == Expiration ==
    /// Replaces the TTL policy. Only values written afterward are affected.
    pub fn set_expiration(&self, expiration: Duration) {
        self.inner.lock().expiration = expiration;
    }

    /// Returns the current TTL policy, zero = never expires.
    pub fn expiration(&self) -> Duration {
        self.inner.lock().expiration
    }

    // == Fill Function ==
    /// Replaces the fill function; `None` disables fill-on-miss.
    pub fn set_fill_fn(&self, fill: Option<FillFn<V>>) {
        self.inner.lock().fill = fill;
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet
    /// looked up.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if the group holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    // == Clear ==
    /// Removes every entry, keeping the policy and fill function.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}
