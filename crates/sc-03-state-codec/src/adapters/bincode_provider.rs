//! Default serialization provider backed by bincode.

use crate::errors::StateError;
use crate::ports::SerializationProvider;
use shared_types::{ComponentState, ViewTuple};

/// Compact binary codec for state graphs. Deterministic for a given input,
/// which keeps server-side blobs and client tokens stable across renders of
/// identical state.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeProvider;

impl SerializationProvider for BincodeProvider {
    fn serialize_tuple(&self, tuple: &ViewTuple) -> Result<Vec<u8>, StateError> {
        bincode::serialize(tuple).map_err(|e| StateError::Serialization(e.to_string()))
    }

    fn deserialize_tuple(&self, bytes: &[u8]) -> Result<ViewTuple, StateError> {
        bincode::deserialize(bytes).map_err(|e| StateError::Serialization(e.to_string()))
    }

    fn serialize_state(&self, state: &ComponentState) -> Result<Vec<u8>, StateError> {
        bincode::serialize(state).map_err(|e| StateError::Serialization(e.to_string()))
    }

    fn deserialize_state(&self, bytes: &[u8]) -> Result<ComponentState, StateError> {
        bincode::deserialize(bytes).map_err(|e| StateError::Serialization(e.to_string()))
    }
}
