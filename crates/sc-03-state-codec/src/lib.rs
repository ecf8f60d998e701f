//! # sc-03-state-codec
//!
//! View-state persistence: round-trips a rendered component tree's
//! `(structure, saved state)` tuple across the stateless protocol.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): composite tokens, state-id generation,
//!   the two-level session view store
//! - **Ports Layer** (`ports/`): `StateCodec` (driving) and
//!   `SerializationProvider` (driven) contracts
//! - **Service Layer** (`service/`): the two codec strategies
//!   - `ClientStateCodec`: full state into the response, nothing retained
//!     server-side; token size is the trade-off
//!   - `ServerStateCodec`: state into session-held LRU maps; only the
//!     `logical:actual` composite key reaches the client
//! - **Adapters Layer** (`adapters/`): bincode serialization provider
//!
//! ## Failure Policy
//!
//! Expired or tampered state is reported as *absent* (`Ok(None)`) so the
//! lifecycle can surface a recoverable "view expired" condition;
//! serialization faults propagate as errors and are never papered over.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::BincodeProvider;
pub use domain::{CompositeToken, SavedState, SessionViewStore, ViewEntry};
pub use errors::StateError;
pub use ports::{RestoredState, SerializationProvider, StateCodec};
pub use service::{ClientStateCodec, ServerStateCodec};
