//! Thread-Safe Flash Store with Mark-and-Sweep Expiration
//!
//! This module implements the core storage engine for flashscope: a
//! concurrency-safe key/value container whose entries expire once consumed.
//!
//! ## Design Decisions
//!
//! 1. **Flag-on-read**: reading a key marks it for removal at the next
//!    sweep. Consumption, not time, is what makes an entry stale.
//! 2. **Clear-on-write**: writing a key unmarks it, so a freshly written
//!    value always survives to the next sweep boundary.
//! 3. **Two collections**: the entry map and the flag set are independent
//!    `RwLock`ed collections; when both are held, `entries` is always
//!    acquired before `flagged`.
//! 4. **Pluggable key normalization**: lookups go through a [`KeyAdapter`]
//!    so `Notice` and `:notice` address the same entry; the engine itself
//!    never inspects key spelling.
//!
//! ## Expiration Protocol
//!
//! ```text
//! put(k, v)      ──> entry live, k unflagged
//! get(k)         ──> k flagged (value returned)
//! keep(k)        ──> k unflagged again
//! flag_all()     ──> every present key flagged
//! sweep()        ──> every flagged entry removed, flags drained
//! ```
//!
//! A value written by request N and read by request N+1 is removed by the
//! sweep that ends N+1. A value never read is never flagged and survives
//! until something flags it (a read, or a `flag_all` policy).
//!
//! ## Concurrency Model
//!
//! Requests for the same session may run on different threads and share one
//! store. Operations are individually consistent but not atomic across each
//! other: two racing requests get last-write-wins on entries and
//! last-mutation-wins on flags. A concurrent `put` may unflag a key right
//! before another thread's `sweep`, in which case the value survives.

use crate::store::keys::{CaseFold, KeyAdapter};
use crate::store::value::FlashValue;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

/// A stored entry: the spelling the key was written with, plus its value.
///
/// The map owning this entry is keyed by the *normalized* key; the original
/// spelling is kept so iteration reports what the writer wrote.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The key spelling used at write time
    pub key: String,
    /// The stored value
    pub value: FlashValue,
}

impl Entry {
    fn new(key: String, value: FlashValue) -> Self {
        Self { key, value }
    }
}

/// The flash storage engine.
///
/// Holds entries handed from one request to the next, each implicitly
/// flagged for removal once read. A `sweep` (run by the scope controller at
/// the end of the outermost request invocation) drops everything flagged.
///
/// # Thread Safety
///
/// This struct is designed to be wrapped in an `Arc`, stored in a session,
/// and shared across all concurrent requests for that session. All
/// operations are thread-safe.
///
/// # Example
///
/// ```
/// use flashscope::store::{FlashStore, FlashValue};
///
/// let store = FlashStore::new();
///
/// // A handler reports its outcome for the next request
/// store.put("notice", "profile updated");
///
/// // The next request reads it; the read flags the entry
/// assert_eq!(store.get("notice"), Some(FlashValue::text("profile updated")));
///
/// // The sweep at the end of that request removes it
/// store.sweep();
/// assert_eq!(store.get("notice"), None);
/// ```
pub struct FlashStore {
    /// Key normalization rule applied to every lookup
    adapter: Box<dyn KeyAdapter>,

    /// Live entries, keyed by normalized key
    entries: RwLock<HashMap<String, Entry>>,

    /// Normalized keys marked for removal at the next sweep
    flagged: RwLock<HashSet<String>>,

    /// Statistics: total read operations
    read_count: AtomicU64,

    /// Statistics: total write operations
    write_count: AtomicU64,

    /// Statistics: total explicit removals
    remove_count: AtomicU64,

    /// Statistics: total sweep passes
    sweep_count: AtomicU64,

    /// Statistics: total entries removed by sweeps
    swept_count: AtomicU64,
}

impl std::fmt::Debug for FlashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashStore")
            .field("entries", &self.len())
            .field("flagged", &self.flagged.read().unwrap().len())
            .field("reads", &self.read_count.load(Ordering::Relaxed))
            .field("writes", &self.write_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for FlashStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashStore {
    /// Creates a new, empty store with the default [`CaseFold`] key adapter.
    pub fn new() -> Self {
        Self::with_adapter(Box::new(CaseFold))
    }

    /// Creates a new store with a custom key normalization adapter.
    pub fn with_adapter(adapter: Box<dyn KeyAdapter>) -> Self {
        Self {
            adapter,
            entries: RwLock::new(HashMap::new()),
            flagged: RwLock::new(HashSet::new()),
            read_count: AtomicU64::new(0),
            write_count: AtomicU64::new(0),
            remove_count: AtomicU64::new(0),
            sweep_count: AtomicU64::new(0),
            swept_count: AtomicU64::new(0),
        }
    }

    /// Inserts or overwrites `key`, clearing its removal flag.
    ///
    /// The value becomes visible to the remainder of the current request and
    /// to the next one; the flag clear means a just-written entry is never
    /// collected by the sweep that follows, even if the old value under the
    /// same key had been read.
    pub fn put(&self, key: impl Into<String>, value: impl Into<FlashValue>) {
        let key = key.into();
        let norm = self.adapter.normalize(&key);
        self.write_count.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.entries.write().unwrap();
        let mut flagged = self.flagged.write().unwrap();
        entries.insert(norm.clone(), Entry::new(key, value.into()));
        flagged.remove(&norm);
    }

    /// Like [`put`](Self::put), expressing "this request only" intent.
    ///
    /// Semantically identical to `put`; it exists so callers can say that a
    /// value is meant for the *current* request's remaining execution. Since
    /// the value is never `keep`-ed across the boundary, the end-of-request
    /// sweep collects it whenever this request's policy flags it (a read, or
    /// the sweep-unused policy).
    pub fn put_now(&self, key: impl Into<String>, value: impl Into<FlashValue>) {
        self.put(key, value);
    }

    /// Returns the value under `key`, flagging the key for the next sweep.
    ///
    /// Returns `None` if the key is absent. The flag is set either way: a
    /// flagged-but-absent key is harmless and is dropped by the next sweep's
    /// drain.
    pub fn get(&self, key: &str) -> Option<FlashValue> {
        let norm = self.adapter.normalize(key);
        self.read_count.fetch_add(1, Ordering::Relaxed);

        let value = {
            let entries = self.entries.read().unwrap();
            entries.get(&norm).map(|entry| entry.value.clone())
        };
        self.flagged.write().unwrap().insert(norm);

        value
    }

    /// Returns the value under `key` without flagging it.
    ///
    /// A peek is not a consumption: the entry's sweep eligibility is
    /// unchanged.
    pub fn peek(&self, key: &str) -> Option<FlashValue> {
        let norm = self.adapter.normalize(key);
        let entries = self.entries.read().unwrap();
        entries.get(&norm).map(|entry| entry.value.clone())
    }

    /// Deletes `key` unconditionally, regardless of flag state.
    ///
    /// No error if absent.
    pub fn remove(&self, key: &str) {
        let norm = self.adapter.normalize(key);
        self.remove_count.fetch_add(1, Ordering::Relaxed);
        self.entries.write().unwrap().remove(&norm);
    }

    /// Checks whether `key` is present, without flagging it.
    pub fn contains(&self, key: &str) -> bool {
        let norm = self.adapter.normalize(key);
        self.entries.read().unwrap().contains_key(&norm)
    }

    /// Returns a one-shot iterator over the entries present right now.
    ///
    /// The snapshot is taken at the moment of call; each `(key, value)` pair
    /// flags its key as it is produced, exactly as a `get` would. A fresh
    /// call re-snapshots live state, which may differ if writes or a sweep
    /// happened in between.
    pub fn iter(&self) -> FlashIter<'_> {
        let snapshot: Vec<(String, String, FlashValue)> = {
            let entries = self.entries.read().unwrap();
            entries
                .iter()
                .map(|(norm, entry)| (norm.clone(), entry.key.clone(), entry.value.clone()))
                .collect()
        };

        FlashIter {
            store: self,
            items: snapshot.into_iter(),
        }
    }

    /// Removes every entry whose key is currently flagged.
    ///
    /// Consumed flags are drained, so sweeping twice with no intervening
    /// reads, writes, or `flag_all` is a no-op the second time. Non-flagged
    /// entries are untouched.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.write().unwrap();
        let mut flagged = self.flagged.write().unwrap();

        let mut removed = 0usize;
        for norm in flagged.drain() {
            if entries.remove(&norm).is_some() {
                removed += 1;
            }
        }

        self.sweep_count.fetch_add(1, Ordering::Relaxed);
        if removed > 0 {
            self.swept_count.fetch_add(removed as u64, Ordering::Relaxed);
            debug!(
                removed = removed,
                remaining = entries.len(),
                "flagged flash entries swept"
            );
        }

        removed
    }

    /// Clears the flag for a single `key`, rescuing it from the next sweep.
    pub fn keep(&self, key: &str) {
        let norm = self.adapter.normalize(key);
        self.flagged.write().unwrap().remove(&norm);
    }

    /// Clears the flag set entirely: nothing is removed at the next sweep,
    /// regardless of prior reads.
    pub fn keep_all(&self) {
        self.flagged.write().unwrap().clear();
    }

    /// Flags every currently-present key for removal at the next sweep.
    ///
    /// Used by the sweep-unused policy: anything not explicitly `keep`-ed
    /// afterward is dropped whether or not it was ever read.
    pub fn flag_all(&self) {
        let entries = self.entries.read().unwrap();
        let mut flagged = self.flagged.write().unwrap();
        for norm in entries.keys() {
            flagged.insert(norm.clone());
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries and flags.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        let mut flagged = self.flagged.write().unwrap();
        entries.clear();
        flagged.clear();
    }

    /// Returns operation statistics.
    pub fn stats(&self) -> FlashStats {
        FlashStats {
            entries: self.len() as u64,
            reads: self.read_count.load(Ordering::Relaxed),
            writes: self.write_count.load(Ordering::Relaxed),
            removes: self.remove_count.load(Ordering::Relaxed),
            sweeps: self.sweep_count.load(Ordering::Relaxed),
            swept: self.swept_count.load(Ordering::Relaxed),
        }
    }
}

/// One-shot iterator over a snapshot of a store's entries.
///
/// Each pair flags its key as it is produced. See [`FlashStore::iter`].
pub struct FlashIter<'a> {
    store: &'a FlashStore,
    items: std::vec::IntoIter<(String, String, FlashValue)>,
}

impl Iterator for FlashIter<'_> {
    type Item = (String, FlashValue);

    fn next(&mut self) -> Option<Self::Item> {
        let (norm, key, value) = self.items.next()?;
        self.store.flagged.write().unwrap().insert(norm);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

/// Store operation statistics.
#[derive(Debug, Clone, Copy)]
pub struct FlashStats {
    /// Number of entries currently stored
    pub entries: u64,
    /// Total read operations (flagging reads only)
    pub reads: u64,
    /// Total write operations
    pub writes: u64,
    /// Total explicit removals
    pub removes: u64,
    /// Total sweep passes
    pub sweeps: u64,
    /// Total entries removed by sweeps
    pub swept: u64,
}
