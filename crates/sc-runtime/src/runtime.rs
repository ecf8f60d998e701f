//! The application container.

use sc_03_state_codec::{
    ClientStateCodec, SerializationProvider, ServerStateCodec, StateCodec, StateError,
};
use sc_04_annotation_cache::{
    AnnotationCache, AnnotationError, ClassMetadata, ProcessingTarget,
};
use shared_types::{ConfigError, StateSaving, WebConfig};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Failures surfacing from application bootstrap or its subsystems.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}

/// One instance per deployed application.
///
/// Owns the immutable configuration, the codec implementing the selected
/// state-saving strategy, and the memoized annotation registry. All three
/// are shared read-only across request threads.
pub struct ApplicationRuntime {
    config: WebConfig,
    codec: Arc<dyn StateCodec>,
    annotations: AnnotationCache,
}

impl ApplicationRuntime {
    pub fn new(config: WebConfig) -> Result<Self, RuntimeError> {
        let codec: Arc<dyn StateCodec> = match config.state_saving {
            StateSaving::Client => Arc::new(ClientStateCodec::new(&config)?),
            StateSaving::Server => Arc::new(ServerStateCodec::new(&config)),
        };
        let annotations = AnnotationCache::new(&config);
        info!(strategy = ?config.state_saving, "application runtime initialized");
        Ok(Self {
            config,
            codec,
            annotations,
        })
    }

    /// Like [`new`](Self::new) but with a custom serialization provider for
    /// the selected codec.
    pub fn with_provider(
        config: WebConfig,
        provider: Arc<dyn SerializationProvider>,
    ) -> Result<Self, RuntimeError> {
        let codec: Arc<dyn StateCodec> = match config.state_saving {
            StateSaving::Client => Arc::new(ClientStateCodec::with_provider(&config, provider)?),
            StateSaving::Server => Arc::new(ServerStateCodec::with_provider(&config, provider)),
        };
        let annotations = AnnotationCache::new(&config);
        Ok(Self {
            config,
            codec,
            annotations,
        })
    }

    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// The codec for the configured state-saving strategy.
    pub fn state_codec(&self) -> &Arc<dyn StateCodec> {
        &self.codec
    }

    pub fn annotations(&self) -> &AnnotationCache {
        &self.annotations
    }

    /// Runs the bootstrap annotation scan over the discovered classes.
    pub fn warm_annotations(
        &self,
        classes: &[(ClassMetadata, ProcessingTarget)],
    ) -> Result<(), RuntimeError> {
        self.annotations.warm(classes)?;
        Ok(())
    }
}
