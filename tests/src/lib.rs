//! # Statecraft Test Suite
//!
//! Unified test crate covering cross-crate flows:
//!
//! ```text
//! tests/src/integration/
//! ├── state_flows.rs       # Server-side saving: lineages, eviction, expiry
//! ├── crypto_flows.rs      # Client-state tokens: keys, tampering, sessions
//! └── annotation_flows.rs  # Scan-once resolution and handler application
//! ```
//!
//! Per-crate unit tests live next to the code they exercise; this crate is
//! for scenarios that only make sense with several crates wired together.

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
