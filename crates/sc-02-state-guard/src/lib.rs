//! # sc-02-state-guard
//!
//! Symmetric protection for client-held view-state tokens.
//!
//! ## Role in System
//!
//! - **StateGuard**: encrypt-then-MAC of opaque byte payloads; the client
//!   state codec runs every token through it when encryption is enabled
//! - **KeySource**: resolves the symmetric key — operator-supplied pre-shared
//!   key first, else generated at first use, optionally pinned per session
//!
//! ## Wire Layout
//!
//! ```text
//! | MAC (32 bytes) | IV (16 bytes) | AES-128-CBC/PKCS7 ciphertext |
//! ```
//!
//! MAC = HMAC-SHA256 over `IV || ciphertext`.
//!
//! ## Security
//!
//! - Authenticate-then-decrypt: the MAC is verified (constant time) before
//!   any decryption is attempted
//! - Verification failure returns `None` — unauthenticated bytes are never
//!   partially trusted

pub mod errors;
pub mod guard;
pub mod keys;

pub use errors::GuardError;
pub use guard::StateGuard;
pub use keys::{KeySource, StateKey};
