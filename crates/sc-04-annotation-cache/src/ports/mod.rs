//! Port definitions for the annotation engine.

use crate::domain::{AnnotationType, ClassMetadata};
use crate::errors::AnnotationError;
use shared_types::RequestContext;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The memoized product of scanning one class: annotation kind to handler.
/// Ordered so handlers apply in a deterministic sequence.
pub type HandlerMap = BTreeMap<AnnotationType, Arc<dyn RuntimeAnnotationHandler>>;

/// A live instance handlers can act on. The only capability the built-in
/// handlers need beyond the request context is event subscription.
pub trait AnnotatedInstance {
    /// Subscribes this instance to `event`, optionally restricted to a
    /// specific source.
    fn subscribe(&mut self, event: &str, source: Option<&str>);
}

/// Deferred application of one annotation's effect.
///
/// Produced once at scan time, capturing everything the annotation's data
/// provides; applied many times, against live instances, on request threads.
/// Implementations must be stateless beyond that captured data.
pub trait RuntimeAnnotationHandler: Send + Sync {
    fn annotation_type(&self) -> AnnotationType;

    fn apply(
        &self,
        ctx: &mut RequestContext,
        instance: &mut dyn AnnotatedInstance,
    ) -> Result<(), AnnotationError>;
}

/// Resolution strategy for one annotation kind.
///
/// Returns `None` when the class does not carry the annotation, a handler
/// when it does, and an error when the declaration is malformed (which is
/// configuration-fatal for the whole scan).
pub trait Scanner: Send + Sync {
    fn annotation_type(&self) -> AnnotationType;

    fn scan(
        &self,
        class: &ClassMetadata,
    ) -> Result<Option<Arc<dyn RuntimeAnnotationHandler>>, AnnotationError>;
}
