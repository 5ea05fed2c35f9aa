//! Request Context
//!
//! The explicit per-request boundary type. A [`RequestContext`] is built
//! once per inbound request and handed by reference through that request's
//! whole call tree, nested handler invocations included. It carries two
//! things:
//!
//! - the session handle, which is the *sharing* boundary: concurrent
//!   requests for the same user see the same session;
//! - a request-scoped attribute map, which is the *non-sharing* boundary:
//!   attributes (the scope claim marker, the cached store reference) are
//!   visible only inside this request's call tree and die with it.
//!
//! Keeping these two on distinct types is deliberate; there is no ambient
//! "current request" anywhere in the crate. Attributes are opaque values
//! downcast at read time, and absence is always handled gracefully.

use crate::scope::session::{SessionBackend, SessionValue};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Per-request state: the session handle plus request-scoped attributes.
///
/// Construct one per inbound request; nested invocations for the same
/// logical request share the same context by reference. Two concurrent
/// requests for the same session each get their own context around the
/// shared session handle.
///
/// # Example
///
/// ```
/// use flashscope::scope::{MemorySession, RequestContext};
/// use std::sync::Arc;
///
/// let session = Arc::new(MemorySession::new());
/// let ctx = RequestContext::new(session);
///
/// ctx.set_attribute("trace.id", Arc::new(7u64));
/// let id = ctx.attribute("trace.id").unwrap().downcast::<u64>().unwrap();
/// assert_eq!(*id, 7);
/// ```
pub struct RequestContext {
    /// The session this request belongs to (shared across requests)
    session: Arc<dyn SessionBackend>,

    /// Request-scoped attributes (never visible outside this request)
    attributes: RwLock<HashMap<&'static str, SessionValue>>,
}

impl RequestContext {
    /// Creates a context for a new inbound request.
    pub fn new(session: Arc<dyn SessionBackend>) -> Self {
        Self {
            session,
            attributes: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the session handle for this request.
    pub fn session(&self) -> &Arc<dyn SessionBackend> {
        &self.session
    }

    /// Returns the attribute stored under `key`, if set.
    pub fn attribute(&self, key: &str) -> Option<SessionValue> {
        self.attributes.read().unwrap().get(key).cloned()
    }

    /// Stores an attribute under `key`, overwriting any previous value.
    pub fn set_attribute(&self, key: &'static str, value: SessionValue) {
        self.attributes.write().unwrap().insert(key, value);
    }

    /// Returns true if an attribute is set under `key`.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.read().unwrap().contains_key(key)
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("attributes", &self.attributes.read().unwrap().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::session::MemorySession;

    #[test]
    fn test_attribute_roundtrip() {
        let ctx = RequestContext::new(Arc::new(MemorySession::new()));

        assert!(!ctx.has_attribute("marker"));
        ctx.set_attribute("marker", Arc::new(true));
        assert!(ctx.has_attribute("marker"));

        let value = ctx.attribute("marker").unwrap();
        assert!(*value.downcast::<bool>().unwrap());
    }

    #[test]
    fn test_attributes_are_per_context() {
        let session = Arc::new(MemorySession::new());
        let a = RequestContext::new(session.clone());
        let b = RequestContext::new(session);

        a.set_attribute("marker", Arc::new(()));
        assert!(a.has_attribute("marker"));
        assert!(!b.has_attribute("marker"));
    }

    #[test]
    fn test_session_is_shared() {
        let session = Arc::new(MemorySession::new());
        let a = RequestContext::new(session.clone());
        let b = RequestContext::new(session);

        a.session().put("k", Arc::new(1u8)).unwrap();
        assert!(b.session().get("k").is_some());
    }
}
