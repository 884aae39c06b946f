//! Shared dedup state for a crawl session
//!
//! A [`HashStore`] backs both the visited-URL set and the seen-content
//! set; a [`PendingCounter`] tracks how many admitted pages have not yet
//! finished their fetch. These three values are the only mutable state
//! shared across workers.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Thread-safe set of hex digests with insert-if-absent semantics
///
/// Once `add` returns, every later `contains` on the same key observes
/// true. There is no fence between a caller's `contains` and a later
/// `add`, so two workers can race past the membership test; the late
/// content check in the fetch stage makes dedup exact.
#[derive(Debug, Default)]
pub struct HashStore {
    data: Mutex<HashSet<String>>,
}

impl HashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key if it is not already present
    pub fn add(&self, key: &str) {
        let mut data = self.data.lock().expect("hash store lock poisoned");
        if !data.contains(key) {
            data.insert(key.to_string());
        }
    }

    /// Returns whether the key is currently in the store
    pub fn contains(&self, key: &str) -> bool {
        self.data
            .lock()
            .expect("hash store lock poisoned")
            .contains(key)
    }

    /// Returns the number of keys in the store
    pub fn len(&self) -> usize {
        self.data.lock().expect("hash store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Atomic counter of pages that are admitted but not yet finalized
///
/// Incremented once per admission, decremented once per fetch
/// finalization. Reaching zero means the frontier is drained.
#[derive(Debug, Default)]
pub struct PendingCounter {
    count: AtomicI64,
}

impl PendingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, amount: i64) {
        self.count.fetch_add(amount, Ordering::SeqCst);
    }

    pub fn subtract(&self, amount: i64) {
        self.count.fetch_sub(amount, Ordering::SeqCst);
    }

    pub fn get(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }
}
