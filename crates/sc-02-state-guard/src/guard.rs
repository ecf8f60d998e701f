//! Encrypt-then-MAC guard for opaque state payloads.

use crate::keys::StateKey;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 output size.
pub const MAC_LENGTH: usize = 32;
/// AES block size; the CBC initialization vector is one block.
pub const IV_LENGTH: usize = 16;

/// Authenticated symmetric cipher over byte payloads.
///
/// Produces `MAC || IV || ciphertext` blobs; the MAC covers `IV || ciphertext`
/// so neither can be swapped independently.
pub struct StateGuard {
    key: StateKey,
}

impl StateGuard {
    pub fn new(key: StateKey) -> Self {
        Self { key }
    }

    /// Encrypts `plaintext` under a fresh random IV and prepends the MAC.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes128CbcEnc::new(self.key.as_bytes().into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(&iv);
        mac.update(&ciphertext);
        let tag = mac.finalize().into_bytes();

        let mut blob = Vec::with_capacity(MAC_LENGTH + IV_LENGTH + ciphertext.len());
        blob.extend_from_slice(&tag);
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        blob
    }

    /// Verifies the MAC and, only then, decrypts.
    ///
    /// Returns `None` for truncated input, a MAC mismatch, or padding
    /// corruption — the caller treats all three as "state absent".
    pub fn decrypt(&self, blob: &[u8]) -> Option<Vec<u8>> {
        if blob.len() < MAC_LENGTH + IV_LENGTH {
            warn!(len = blob.len(), "state token too short to authenticate");
            return None;
        }

        let (tag, rest) = blob.split_at(MAC_LENGTH);
        let (iv, ciphertext) = rest.split_at(IV_LENGTH);

        let mut mac = HmacSha256::new_from_slice(self.key.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(iv);
        mac.update(ciphertext);
        let expected = mac.finalize().into_bytes();

        // Constant-time comparison; bail before touching the cipher.
        if expected.ct_eq(tag).unwrap_u8() != 1 {
            warn!("state token MAC did not verify; discarding state");
            return None;
        }

        let iv: [u8; IV_LENGTH] = iv.try_into().expect("split at IV_LENGTH");
        Aes128CbcDec::new(self.key.as_bytes().into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .ok()
    }
}
