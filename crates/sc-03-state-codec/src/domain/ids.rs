//! Server-state id generation.

use rand::rngs::OsRng;
use rand::RngCore;
use shared_types::{session_keys, SessionAttrs};

/// Prefix for serial ids, matching the component-tree unique-id namespace.
const SERIAL_ID_PREFIX: &str = "j_id";

/// Mints logical/actual view ids.
///
/// Two operator-selectable modes:
/// - serial (default): a per-session counter. Compact keys, but predictable
///   by construction — an accepted trade-off, not a defect to repair.
/// - random: 64 bits from the OS entropy source, for deployments that need
///   unguessable state keys.
#[derive(Clone, Copy, Debug)]
pub struct IdGenerator {
    random: bool,
}

impl IdGenerator {
    pub fn new(generate_unique_ids: bool) -> Self {
        Self {
            random: generate_unique_ids,
        }
    }

    /// Returns the next id. The serial counter lives in the session
    /// attribute map; the caller already holds the session lock, so a plain
    /// integer suffices.
    pub fn next(&self, attrs: &mut SessionAttrs<'_>) -> String {
        if self.random {
            return OsRng.next_u64().to_string();
        }

        let counter = attrs.get_or_insert_with(session_keys::SERIAL_ID, || 1u64);
        let id = format!("{SERIAL_ID_PREFIX}{counter}");
        *counter += 1;
        id
    }
}
