//! Session Collaborator
//!
//! The flash store outlives any single request by living in the end-user
//! session. This module specifies that collaborator at its interface
//! boundary: an opaque get/put keyed by a fixed string, where "no active
//! session" is an expected state rather than a failure.
//!
//! Two backends ship with the crate: [`MemorySession`], the in-process map
//! used by tests and the demo binary, and [`NoSession`], which models a
//! request arriving without a session so the degradation path can be
//! exercised.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// An opaque value held by a session.
///
/// Callers downcast at read time; a failed downcast is treated the same as
/// absence.
pub type SessionValue = Arc<dyn Any + Send + Sync>;

/// Returned by [`SessionBackend::put`] when no session is available to
/// write into.
///
/// Flash persistence treats this as a silent, recoverable condition: the
/// handler's own result is never affected by it.
#[derive(Debug, Error)]
#[error("no active session")]
pub struct SessionUnavailable;

/// Per-end-user session storage, shared by all of that user's requests.
///
/// Implementations must be safe to call from concurrent requests.
pub trait SessionBackend: Send + Sync {
    /// Returns the value stored under `key`, if a session is active and the
    /// key is present.
    fn get(&self, key: &str) -> Option<SessionValue>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// [`SessionUnavailable`] when there is no session to write into.
    fn put(&self, key: &str, value: SessionValue) -> Result<(), SessionUnavailable>;
}

/// An in-memory session backend.
///
/// One instance stands in for one end-user session; share it (via `Arc`)
/// across the requests that belong to that user.
#[derive(Default)]
pub struct MemorySession {
    values: RwLock<HashMap<String, SessionValue>>,
}

impl MemorySession {
    /// Creates a new, empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys stored in the session.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    /// Returns true if the session holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySession")
            .field("keys", &self.len())
            .finish()
    }
}

impl SessionBackend for MemorySession {
    fn get(&self, key: &str) -> Option<SessionValue> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: SessionValue) -> Result<(), SessionUnavailable> {
        self.values.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// The absent session: every read misses, every write fails.
///
/// Models a request handled without an established session, where flash
/// data cannot be carried forward and is silently dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSession;

impl SessionBackend for NoSession {
    fn get(&self, _key: &str) -> Option<SessionValue> {
        None
    }

    fn put(&self, _key: &str, _value: SessionValue) -> Result<(), SessionUnavailable> {
        Err(SessionUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_session_roundtrip() {
        let session = MemorySession::new();
        assert!(session.get("flash").is_none());

        session
            .put("flash", Arc::new(42u32))
            .expect("memory session always accepts writes");

        let value = session.get("flash").unwrap();
        let n = value.downcast::<u32>().unwrap();
        assert_eq!(*n, 42);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_memory_session_overwrite() {
        let session = MemorySession::new();
        session.put("flash", Arc::new(1u32)).unwrap();
        session.put("flash", Arc::new(2u32)).unwrap();

        let value = session.get("flash").unwrap();
        assert_eq!(*value.downcast::<u32>().unwrap(), 2);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_no_session() {
        let session = NoSession;
        assert!(session.get("flash").is_none());
        assert!(session.put("flash", Arc::new(())).is_err());
    }
}
