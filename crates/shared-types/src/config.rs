//! Application configuration consumed by the state and annotation engines.
//!
//! Plays the role of a deployment descriptor's context init parameters,
//! validated once at construction instead of being re-parsed per request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How view state is persisted across the stateless protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateSaving {
    /// Full state is encoded into the response and returned by the client.
    Client,
    /// State stays in the session; only a composite key reaches the client.
    Server,
}

/// Deployment stage, controlling how apply-time handler failures surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStage {
    /// Handler-apply failures are logged and swallowed.
    Production,
    /// Handler-apply failures surface as errors for the developer.
    Development,
}

/// Errors raised when a configuration is structurally invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Capacity must be at least 1: {name} = {value}")]
    ZeroCapacity { name: &'static str, value: usize },

    #[error("Annotation scan pool needs at least one thread")]
    ZeroScanThreads,
}

/// Configuration knobs for the view-state and annotation subsystems.
///
/// Defaults follow the classic init-parameter defaults of component UI
/// frameworks: server-side saving, 15x15 view history, incremental ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    /// Selected persistence strategy.
    pub state_saving: StateSaving,
    /// Cap on logical views (browsing lineages) kept per session.
    pub number_of_logical_views: usize,
    /// Cap on rendered snapshots kept per logical view.
    pub number_of_views: usize,
    /// `true`: random 64-bit server-state ids; `false`: per-session counter.
    pub generate_unique_server_state_ids: bool,
    /// Gzip serialized state (both strategies).
    pub compress_view_state: bool,
    /// Encrypt + MAC client-state tokens.
    pub encrypt_client_state: bool,
    /// Store server-side saved state as a serialized blob instead of a live
    /// value graph. Trades CPU for per-entry session memory.
    pub serialize_server_state: bool,
    /// Emit `autocomplete="off"` on the view-state hidden field.
    pub auto_complete_off_on_view_state: bool,
    /// Base64 pre-shared key for client-state encryption. Overrides key
    /// generation when present (container-supplied key analog).
    pub client_state_secret_key: Option<String>,
    /// Generate and cache a distinct state key per session.
    pub pin_state_key_in_session: bool,
    /// Worker cap for the bootstrap annotation scan pool.
    pub annotation_scan_threads: usize,
    /// Deployment stage.
    pub project_stage: ProjectStage,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            state_saving: StateSaving::Server,
            number_of_logical_views: 15,
            number_of_views: 15,
            generate_unique_server_state_ids: false,
            compress_view_state: true,
            encrypt_client_state: true,
            serialize_server_state: false,
            auto_complete_off_on_view_state: true,
            client_state_secret_key: None,
            pin_state_key_in_session: false,
            annotation_scan_threads: 5,
            project_stage: ProjectStage::Production,
        }
    }
}

impl WebConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> WebConfigBuilder {
        WebConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Fluent builder for [`WebConfig`] with validation at `build`.
#[derive(Clone, Debug)]
pub struct WebConfigBuilder {
    config: WebConfig,
}

impl WebConfigBuilder {
    pub fn state_saving(mut self, method: StateSaving) -> Self {
        self.config.state_saving = method;
        self
    }

    pub fn number_of_logical_views(mut self, n: usize) -> Self {
        self.config.number_of_logical_views = n;
        self
    }

    pub fn number_of_views(mut self, n: usize) -> Self {
        self.config.number_of_views = n;
        self
    }

    pub fn generate_unique_server_state_ids(mut self, enabled: bool) -> Self {
        self.config.generate_unique_server_state_ids = enabled;
        self
    }

    pub fn compress_view_state(mut self, enabled: bool) -> Self {
        self.config.compress_view_state = enabled;
        self
    }

    pub fn encrypt_client_state(mut self, enabled: bool) -> Self {
        self.config.encrypt_client_state = enabled;
        self
    }

    pub fn serialize_server_state(mut self, enabled: bool) -> Self {
        self.config.serialize_server_state = enabled;
        self
    }

    pub fn auto_complete_off_on_view_state(mut self, enabled: bool) -> Self {
        self.config.auto_complete_off_on_view_state = enabled;
        self
    }

    pub fn client_state_secret_key(mut self, key: impl Into<String>) -> Self {
        self.config.client_state_secret_key = Some(key.into());
        self
    }

    pub fn pin_state_key_in_session(mut self, enabled: bool) -> Self {
        self.config.pin_state_key_in_session = enabled;
        self
    }

    pub fn annotation_scan_threads(mut self, n: usize) -> Self {
        self.config.annotation_scan_threads = n;
        self
    }

    pub fn project_stage(mut self, stage: ProjectStage) -> Self {
        self.config.project_stage = stage;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<WebConfig, ConfigError> {
        if self.config.number_of_logical_views == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "number_of_logical_views",
                value: 0,
            });
        }
        if self.config.number_of_views == 0 {
            return Err(ConfigError::ZeroCapacity {
                name: "number_of_views",
                value: 0,
            });
        }
        if self.config.annotation_scan_threads == 0 {
            return Err(ConfigError::ZeroScanThreads);
        }
        Ok(self.config)
    }
}
