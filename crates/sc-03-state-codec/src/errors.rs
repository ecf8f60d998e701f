//! Error types for the state codec subsystem.

use sc_02_state_guard::GuardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("State serialization failed: {0}")]
    Serialization(String),

    #[error("View state compression failed: {0}")]
    Compression(String),

    #[error("No state supplied for a non-transient view")]
    MissingState,

    #[error("Cannot determine statelessness: request is not a postback")]
    NotPostback,

    #[error("State key configuration invalid: {0}")]
    Key(#[from] GuardError),
}
