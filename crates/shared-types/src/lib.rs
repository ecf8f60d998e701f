//! # shared-types
//!
//! Cross-cutting types for the Statecraft view-state core.
//!
//! ## Role in System
//!
//! - **Explicit Contexts**: `RequestContext` and `Session` replace the
//!   thread-local / servlet-attribute lookups of classic server-side UI
//!   frameworks with constructor-injected objects
//! - **Configuration**: `WebConfig` carries every knob the state and
//!   annotation engines consume
//! - **Tree Snapshots**: the `(structure, saved state)` tuple that the
//!   component-tree layer produces on render and consumes on postback
//!
//! ## Reserved Names
//!
//! Hidden-field parameter names (`jakarta.faces.ViewState`,
//! `jakarta.faces.ClientWindow`, `jakarta.faces.RenderKitId`) and the
//! `statecraft.`-prefixed session attribute keys live in [`fields`] and
//! [`session_keys`]. Collaborating layers must not invent their own.

pub mod config;
pub mod context;
pub mod session;
pub mod state;

pub use config::*;
pub use context::*;
pub use session::*;
pub use state::*;

/// Hidden form-field names and token literals shared with the client.
pub mod fields {
    /// Carries the opaque client-state token or the `logical:actual`
    /// composite server-state token.
    pub const VIEW_STATE_PARAM: &str = "jakarta.faces.ViewState";

    /// Postback correlation field written when a client window is active.
    pub const CLIENT_WINDOW_PARAM: &str = "jakarta.faces.ClientWindow";

    /// Written when the view was rendered by a non-default render kit.
    pub const RENDER_KIT_ID_PARAM: &str = "jakarta.faces.RenderKitId";

    /// Token literal for views that intentionally hold no state.
    pub const STATELESS: &str = "stateless";

    /// Render kit assumed when the view does not name one.
    pub const DEFAULT_RENDER_KIT: &str = "HTML_BASIC";
}

/// Session attribute keys, namespaced under the framework-reserved prefix.
pub mod session_keys {
    /// Prefix reserved for framework-owned session attributes.
    pub const PREFIX: &str = "statecraft.";

    /// Per-session serial counter used for incremental state ids.
    pub const SERIAL_ID: &str = "statecraft.SerialId";

    /// Top-level logical-view LRU map for server-side state saving.
    pub const LOGICAL_VIEW_MAP: &str = "statecraft.LogicalViewMap";

    /// Session-pinned symmetric key for client-state encryption.
    pub const STATE_KEY: &str = "statecraft.StateKey";
}
