//! Keyed deadlines on a logical millisecond clock.
//!
//! Each key has at most one pending deadline; scheduling a key that is
//! already pending replaces it. That gives debounce semantics: the last
//! trigger wins and earlier ones never fire.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Pending deadlines by key.
#[derive(Clone, Debug)]
pub struct Scheduler<K> {
    deadlines: FxHashMap<K, u64>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            deadlines: FxHashMap::default(),
        }
    }
}

impl<K: Clone + Eq + Hash + Ord> Scheduler<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` at `at_ms`, replacing any pending deadline for it.
    ///
    /// Returns the replaced deadline.
    pub fn schedule(&mut self, key: K, at_ms: u64) -> Option<u64> {
        self.deadlines.insert(key, at_ms)
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    /// Cancel every key matching `predicate`.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) {
        self.deadlines.retain(|key, _| !predicate(key));
    }

    #[must_use]
    pub fn deadline(&self, key: &K) -> Option<u64> {
        self.deadlines.get(key).copied()
    }

    #[must_use]
    pub fn is_scheduled(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines.values().copied().min()
    }

    /// Remove and return the earliest key due at or before `now_ms`.
    ///
    /// Equal deadlines come out in key order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(K, u64)> {
        let (key, at) = self
            .deadlines
            .iter()
            .filter(|(_, at)| **at <= now_ms)
            .min_by(|(ka, a), (kb, b)| a.cmp(b).then_with(|| ka.cmp(kb)))
            .map(|(key, &at)| (key.clone(), at))?;
        self.deadlines.remove(&key);
        Some((key, at))
    }
}
