//! Port definitions for the state codec subsystem.

use crate::errors::StateError;
use shared_types::{ComponentState, RequestContext, ViewTuple};

/// Outcome of restoring state on a postback.
#[derive(Clone, Debug, PartialEq)]
pub enum RestoredState {
    /// The view intentionally holds no state (the `"stateless"` sentinel).
    Stateless,
    /// The recovered snapshot.
    View(ViewTuple),
}

/// The state-persistence contract: one implementation per saving strategy.
///
/// `write_state` is called by the rendering layer on every render;
/// `get_state` by the lifecycle layer on every postback.
pub trait StateCodec: Send + Sync {
    /// Persists `state` and emits the resulting token.
    ///
    /// With `capture` supplied the raw token is appended to it and no markup
    /// is produced; otherwise the token is written as the view-state hidden
    /// field through the context's response writer, together with the
    /// client-window and render-kit correlation fields where applicable.
    ///
    /// `state` may only be `None` for a transient view.
    fn write_state(
        &self,
        ctx: &mut RequestContext,
        state: Option<&ViewTuple>,
        capture: Option<&mut String>,
    ) -> Result<(), StateError>;

    /// Recovers the state referenced by the request's view-state parameter.
    ///
    /// `Ok(None)` means no parameter (fresh GET) or expired/unverifiable
    /// state; the caller treats the latter as "view expired".
    fn get_state(
        &self,
        ctx: &mut RequestContext,
        view_id: &str,
    ) -> Result<Option<RestoredState>, StateError>;

    /// Whether the inbound postback declares itself stateless.
    ///
    /// Errors when the request is not a postback at all.
    fn is_stateless(&self, ctx: &RequestContext, view_id: &str) -> Result<bool, StateError>;
}

/// Pluggable object⇄bytes codec for the save-state graph.
///
/// Two shapes are needed: the full tuple (client-state tokens) and the bare
/// component state (the server-side `serialize_server_state` path, where the
/// structure stays live in the session).
pub trait SerializationProvider: Send + Sync {
    fn serialize_tuple(&self, tuple: &ViewTuple) -> Result<Vec<u8>, StateError>;

    fn deserialize_tuple(&self, bytes: &[u8]) -> Result<ViewTuple, StateError>;

    fn serialize_state(&self, state: &ComponentState) -> Result<Vec<u8>, StateError>;

    fn deserialize_state(&self, bytes: &[u8]) -> Result<ComponentState, StateError>;
}
