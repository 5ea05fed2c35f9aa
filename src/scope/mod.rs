//! Request Scope Module
//!
//! This module provides the request-boundary half of flashscope: who owns
//! the store, when it is loaded, when the expiration policy and sweep run,
//! and how the store gets back into the session afterward.
//!
//! ## Architecture
//!
//! ```text
//!            session (shared across requests)
//!                 │  SessionBackend
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ScopeController                          │
//! │                                                             │
//! │  resolve store ──> claim request ──> delegate to handler    │
//! │                                            │                │
//! │                      sweep + persist <─────┘                │
//! │                     (outermost only)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                 ▲
//!                 │  claim marker, cached store ref
//!            RequestContext (one per request, dies with it)
//! ```
//!
//! ## Example
//!
//! ```
//! use flashscope::scope::{MemorySession, RequestContext, ScopeController};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let session = Arc::new(MemorySession::new());
//! let controller = ScopeController::new();
//!
//! let ctx = RequestContext::new(session);
//! controller
//!     .around(&ctx, || async {
//!         controller.store_for(&ctx).put("notice", "saved");
//!         Ok::<_, ()>(())
//!     })
//!     .await
//!     .unwrap();
//! # });
//! ```

pub mod context;
pub mod controller;
pub mod session;

// Re-export commonly used types
pub use context::RequestContext;
pub use controller::{ScopeConfig, ScopeController, ScopeStats, CLAIM_ATTRIBUTE, STORE_ATTRIBUTE};
pub use session::{MemorySession, NoSession, SessionBackend, SessionUnavailable, SessionValue};
