//! Symmetric key material and key-source resolution.

use crate::errors::GuardError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use rand::RngCore;
use shared_types::{session_keys, Session};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-128 key size in bytes. The same key feeds the HMAC.
pub const KEY_LENGTH: usize = 16;

/// A symmetric state key, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct StateKey([u8; KEY_LENGTH]);

impl StateKey {
    /// Generates a fresh key from the OS entropy source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Decodes an operator-supplied base64 key.
    pub fn from_base64(encoded: &str) -> Result<Self, GuardError> {
        let raw = STANDARD
            .decode(encoded)
            .map_err(|e| GuardError::KeyNotBase64(e.to_string()))?;
        let bytes: [u8; KEY_LENGTH] =
            raw.try_into().map_err(|raw: Vec<u8>| GuardError::KeyWrongLength {
                expected: KEY_LENGTH,
                actual: raw.len(),
            })?;
        Ok(Self(bytes))
    }

    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for StateKey {
    // Key material never reaches logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StateKey(..)")
    }
}

/// Resolves which key protects a given request's state token.
///
/// Precedence: configured pre-shared key, else session-pinned key (when
/// pinning is enabled and a session exists), else one lazily generated
/// process-wide key.
pub struct KeySource {
    preshared: Option<StateKey>,
    pin_in_session: bool,
    process_key: OnceCell<StateKey>,
}

impl KeySource {
    /// Builds a key source from the configured secret and pinning flag.
    pub fn from_config(
        client_state_secret_key: Option<&str>,
        pin_in_session: bool,
    ) -> Result<Self, GuardError> {
        let preshared = client_state_secret_key
            .map(StateKey::from_base64)
            .transpose()?;
        Ok(Self {
            preshared,
            pin_in_session,
            process_key: OnceCell::new(),
        })
    }

    /// The key for the given request's session context.
    ///
    /// With pinning enabled, each session receives its own generated key on
    /// first use, cached in its attribute map; compromising one session's
    /// key exposes no other session. A configured pre-shared key always wins.
    pub fn key_for(&self, session: Option<&Session>) -> StateKey {
        if let Some(key) = &self.preshared {
            return key.clone();
        }

        if self.pin_in_session {
            if let Some(session) = session {
                let mut attrs = session.lock();
                if !attrs.contains(session_keys::STATE_KEY) {
                    debug!(session = %session.id(), "pinning fresh state key in session");
                }
                return attrs
                    .get_or_insert_with(session_keys::STATE_KEY, StateKey::generate)
                    .clone();
            }
        }

        self.process_key.get_or_init(StateKey::generate).clone()
    }
}
