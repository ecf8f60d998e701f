//! # sc-01-view-cache
//!
//! Fixed-capacity, access-ordered LRU map for the view-state engine.
//!
//! ## Role in System
//!
//! - Backs the session-held **logical view map** (one entry per browsing
//!   lineage) and each nested **actual view map** (one entry per rendered
//!   snapshot within a lineage)
//! - Overflow evicts the least-recently-accessed entry; both `get` and `put`
//!   count as access
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: the cache never holds more than `capacity` entries
//! - **INVARIANT-2**: inserting `capacity + k` distinct keys evicts exactly
//!   the `k` least-recently-touched pre-overflow entries, in least-recent
//!   order
//!
//! Not thread-safe. The server state codec serializes access through the
//! owning session's mutex.

pub mod cache;

pub use cache::ViewCache;
