//! Scope Controller
//!
//! This module decides *when* the flash store's expiration machinery runs.
//! The store itself only knows how to flag and sweep; the controller pins
//! those operations to request boundaries:
//!
//! ```text
//! request arrives
//!       │
//!       ▼
//! ┌──────────────────────────────────────────────┐
//! │ around(ctx, next)                            │
//! │                                              │
//! │  1. resolve store (request cache → session   │
//! │     → fresh), cache on request               │
//! │  2. claim the request (outermost only);      │
//! │     flag_all() if sweep_unused policy is on  │
//! │  3. delegate to next (handler chain)         │
//! │  4. sweep() ── outermost only, success or    │
//! │     failure alike                            │
//! │  5. persist store to session (best-effort)   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Nesting
//!
//! Composed handlers may wrap the same logical request in several `around`
//! calls. The first invocation claims the request by setting a marker on the
//! request context; every deeper invocation observes the marker and becomes
//! a pure pass-through. Flag policy and sweep therefore run exactly once per
//! request, at the outermost boundary, no matter how deep the nesting goes.
//!
//! A read performed *inside* a nested invocation still flags its key: nested
//! invocations share the outer store instance and flag set, so the one sweep
//! that runs honors flags set anywhere in the call tree.
//!
//! ## Failure Semantics
//!
//! The wrapped handler's result passes through unmodified, and the sweep and
//! persistence steps run the same way on success and on failure. Only the
//! persistence step absorbs an error: a request whose session has gone away
//! loses its flash data silently.

use crate::scope::context::RequestContext;
use crate::scope::session::SessionUnavailable;
use crate::store::FlashStore;
use crate::FLASH_SESSION_KEY;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Request attribute holding the claim marker.
///
/// Present on a request context from the moment the outermost `around`
/// invocation enters until the request ends.
pub const CLAIM_ATTRIBUTE: &str = "flashscope.claimed";

/// Request attribute caching the session's flash store for this request.
pub const STORE_ATTRIBUTE: &str = "flashscope.store";

/// Scope policy configuration.
#[derive(Debug, Clone, Default)]
pub struct ScopeConfig {
    /// When enabled, the outermost invocation flags every entry before
    /// delegating to the handler. Entries the handler neither reads nor
    /// explicitly keeps are then dropped by the terminating sweep, whether
    /// or not they were ever read. This trades "available to the next
    /// request" strictness for "available to exactly one request"
    /// strictness. Off by default.
    pub sweep_unused: bool,
}

/// Governs flash store lifecycle across request boundaries.
///
/// One controller instance serves any number of requests and sessions; all
/// per-request state lives on the [`RequestContext`], all cross-request
/// state in the session.
///
/// # Example
///
/// ```
/// use flashscope::scope::{MemorySession, RequestContext, ScopeController};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let session = Arc::new(MemorySession::new());
/// let controller = ScopeController::new();
///
/// // Request 1: a state-changing action reports its outcome
/// let ctx = RequestContext::new(session.clone());
/// controller
///     .around(&ctx, || async {
///         controller.store_for(&ctx).put("notice", "profile updated");
///         Ok::<_, ()>(())
///     })
///     .await
///     .unwrap();
///
/// // Request 2: the follow-up sees the value; the sweep then drops it
/// let ctx = RequestContext::new(session.clone());
/// controller
///     .around(&ctx, || async {
///         let store = controller.store_for(&ctx);
///         assert!(store.get("notice").is_some());
///         Ok::<_, ()>(())
///     })
///     .await
///     .unwrap();
/// # });
/// ```
pub struct ScopeController {
    /// Scope policy
    config: ScopeConfig,

    /// Statistics: outermost invocations handled
    request_count: AtomicU64,

    /// Statistics: nested (pass-through) invocations
    nested_count: AtomicU64,

    /// Statistics: sweeps triggered at request boundaries
    sweep_count: AtomicU64,

    /// Statistics: persistence attempts swallowed for lack of a session
    persist_failure_count: AtomicU64,
}

impl std::fmt::Debug for ScopeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeController")
            .field("config", &self.config)
            .field("requests", &self.request_count.load(Ordering::Relaxed))
            .field("nested", &self.nested_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for ScopeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeController {
    /// Creates a controller with the default policy (`sweep_unused` off).
    pub fn new() -> Self {
        Self::with_config(ScopeConfig::default())
    }

    /// Creates a controller with an explicit policy.
    pub fn with_config(config: ScopeConfig) -> Self {
        Self {
            config,
            request_count: AtomicU64::new(0),
            nested_count: AtomicU64::new(0),
            sweep_count: AtomicU64::new(0),
            persist_failure_count: AtomicU64::new(0),
        }
    }

    /// Resolves the flash store for the request's session.
    ///
    /// Lookup order: the request-scoped cache, then the session under
    /// [`FLASH_SESSION_KEY`], then a freshly created store. Whatever is
    /// found is cached on the request, so repeated calls within one request
    /// hit the session at most once and always return the same instance.
    pub fn store_for(&self, ctx: &RequestContext) -> Arc<FlashStore> {
        if let Some(cached) = ctx.attribute(STORE_ATTRIBUTE) {
            if let Ok(store) = cached.downcast::<FlashStore>() {
                return store;
            }
        }

        let store = ctx
            .session()
            .get(FLASH_SESSION_KEY)
            .and_then(|value| value.downcast::<FlashStore>().ok())
            .unwrap_or_else(|| {
                trace!("no flash store in session, creating one");
                Arc::new(FlashStore::new())
            });

        ctx.set_attribute(STORE_ATTRIBUTE, store.clone());
        store
    }

    /// Wraps one handler invocation for a request.
    ///
    /// The first `around` call on a given context claims the request and
    /// owns its flag-policy and sweep duties; nested calls just delegate.
    /// The handler's own `Result` is returned unchanged either way.
    pub async fn around<F, Fut, T, E>(&self, ctx: &RequestContext, next: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let store = self.store_for(ctx);

        let outermost = !ctx.has_attribute(CLAIM_ATTRIBUTE);
        if outermost {
            ctx.set_attribute(CLAIM_ATTRIBUTE, Arc::new(()));
            self.request_count.fetch_add(1, Ordering::Relaxed);

            if self.config.sweep_unused {
                trace!("sweep-unused policy: flagging all entries");
                store.flag_all();
            }
        } else {
            self.nested_count.fetch_add(1, Ordering::Relaxed);
        }

        let result = next().await;

        // Sweep and persist run on the outermost exit only, for failed
        // handlers exactly as for successful ones.
        if outermost {
            let removed = store.sweep();
            self.sweep_count.fetch_add(1, Ordering::Relaxed);
            trace!(removed = removed, "request boundary sweep complete");

            if let Err(SessionUnavailable) = ctx.session().put(FLASH_SESSION_KEY, store) {
                self.persist_failure_count.fetch_add(1, Ordering::Relaxed);
                debug!("session unavailable, flash entries dropped");
            }
        }

        result
    }

    /// Returns controller statistics.
    pub fn stats(&self) -> ScopeStats {
        ScopeStats {
            requests: self.request_count.load(Ordering::Relaxed),
            nested: self.nested_count.load(Ordering::Relaxed),
            sweeps: self.sweep_count.load(Ordering::Relaxed),
            persist_failures: self.persist_failure_count.load(Ordering::Relaxed),
        }
    }
}

/// Controller statistics.
#[derive(Debug, Clone, Copy)]
pub struct ScopeStats {
    /// Outermost invocations handled
    pub requests: u64,
    /// Nested pass-through invocations
    pub nested: u64,
    /// Boundary sweeps run
    pub sweeps: u64,
    /// Persistence attempts swallowed for lack of a session
    pub persist_failures: u64,
}
