//! # flashscope - Transient Request-Scoped Flash Storage
//!
//! flashscope passes values from one request to exactly the next logical
//! request in a session, after which they self-expire. The classic use is
//! the POST-redirect-GET pattern: the action handling a form submission
//! stores its outcome, the redirected GET renders it, and the entry is gone.
//!
//! ## Expiration Protocol
//!
//! There are no timestamps and no TTLs. Every entry is implicitly flagged
//! for removal once *read* (or in bulk via `flag_all`); flags are cleared by
//! a fresh write or an explicit `keep`. A sweep at the end of each request
//! removes everything still flagged. Consumption is what expires a value.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            flashscope                               │
//! │                                                                     │
//! │   request N                      request N+1                        │
//! │  ┌─────────────┐                ┌─────────────┐                     │
//! │  │  handler    │                │  handler    │                     │
//! │  │  put(k, v)  │                │  get(k) ──┐ │                     │
//! │  └──────┬──────┘                └───────────┼─┘                     │
//! │         │                                   │ flag-on-read          │
//! │         ▼                                   ▼                       │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                        FlashStore                            │  │
//! │  │      entries: RwLock<HashMap>   flagged: RwLock<HashSet>     │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │         ▲                                   │                       │
//! │         │ resolve / persist                 │ sweep()               │
//! │  ┌──────┴───────────────────────────────────▼──────┐               │
//! │  │                 ScopeController                 │               │
//! │  │   claims each request once, sweeps at the       │               │
//! │  │   outermost boundary, persists to the session   │               │
//! │  └─────────────────────────────────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use flashscope::scope::{MemorySession, RequestContext, ScopeController};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let session = Arc::new(MemorySession::new());
//! let controller = ScopeController::new();
//!
//! // Request 1: a POST handler reports its outcome
//! let ctx = RequestContext::new(session.clone());
//! controller
//!     .around(&ctx, || async {
//!         controller.store_for(&ctx).put("notice", "profile updated");
//!         Ok::<_, ()>(())
//!     })
//!     .await
//!     .unwrap();
//!
//! // Request 2: the redirected GET renders it; the value then expires
//! let ctx = RequestContext::new(session.clone());
//! controller
//!     .around(&ctx, || async {
//!         let store = controller.store_for(&ctx);
//!         assert!(store.get("notice").is_some());
//!         Ok::<_, ()>(())
//!     })
//!     .await
//!     .unwrap();
//! # });
//! ```
//!
//! ## Module Overview
//!
//! - [`store`]: the thread-safe mark-and-sweep storage engine, its tagged
//!   value type, and the key normalization adapter
//! - [`scope`]: the per-request controller, request context, and session
//!   collaborator
//!
//! ## Design Highlights
//!
//! ### Flag Timing Under Nesting
//!
//! Composed handlers may wrap one logical request in several controller
//! invocations. Only the outermost invocation applies the flag policy and
//! runs the sweep; nested invocations are pass-throughs that share the same
//! store, so a read anywhere in the call tree is honored by the one sweep
//! that runs.
//!
//! ### Thread Safety
//!
//! One store serves all concurrent requests of a session. The entry map and
//! flag set are independently locked with a fixed acquisition order;
//! cross-operation races resolve as last-write-wins, which the protocol
//! tolerates by construction.

pub mod scope;
pub mod store;

// Re-export commonly used types for convenience
pub use scope::{
    MemorySession, NoSession, RequestContext, ScopeConfig, ScopeController, SessionBackend,
    SessionUnavailable,
};
pub use store::{FlashStats, FlashStore, FlashValue, KeyAdapter};

/// The session key under which the flash store is persisted
pub const FLASH_SESSION_KEY: &str = "flash";

/// Version of flashscope
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
