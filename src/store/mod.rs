//! Flash Storage Module
//!
//! This module provides the storage half of flashscope: a thread-safe
//! key/value container whose entries are flagged for removal as they are
//! read and reclaimed by an explicit sweep.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       FlashStore                            │
//! │   ┌───────────────────────┐   ┌───────────────────────┐    │
//! │   │  entries              │   │  flagged              │    │
//! │   │  RwLock<HashMap>      │   │  RwLock<HashSet>      │    │
//! │   │  norm key → Entry     │   │  norm keys to sweep   │    │
//! │   └───────────────────────┘   └───────────────────────┘    │
//! │               ▲                        ▲                    │
//! │               └──────── KeyAdapter ────┘                    │
//! │                   (lookup normalization)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Flag-on-read**: a value becomes sweep-eligible the moment it is
//!   consumed
//! - **Clear-on-write**: writing a key always rescues it from the next sweep
//! - **Key indifference**: `Notice`, `notice`, and `:notice` address one
//!   entry
//! - **Tagged values**: text, bytes, integers, booleans, and lists
//!
//! ## Example
//!
//! ```
//! use flashscope::store::{FlashStore, FlashValue};
//!
//! let store = FlashStore::new();
//!
//! store.put("notice", "profile updated");
//! assert_eq!(store.get("notice"), Some(FlashValue::text("profile updated")));
//!
//! // The read above flagged the entry; the sweep reclaims it
//! store.sweep();
//! assert!(store.is_empty());
//! ```

pub mod engine;
pub mod keys;
pub mod value;

// Re-export commonly used types
pub use engine::{Entry, FlashIter, FlashStats, FlashStore};
pub use keys::{CaseFold, KeyAdapter};
pub use value::FlashValue;
