//! Error types for the state guard.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Configured state key is not valid base64: {0}")]
    KeyNotBase64(String),

    #[error("Configured state key has wrong length: expected {expected} bytes, got {actual}")]
    KeyWrongLength { expected: usize, actual: usize },
}
