//! Error types for annotation resolution and application.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnnotationError {
    /// Scanning a class failed. Configuration-fatal: bootstrap must not
    /// proceed with a half-resolved registry.
    #[error("Annotation scan failed for class {class}: {reason}")]
    ScanFailed { class: String, reason: String },

    /// A handler could not apply its annotation to a live instance. Only
    /// surfaced in Development stage; Production logs and moves on.
    #[error("Failed to apply {annotation} to {class}: {reason}")]
    ApplyFailed {
        annotation: &'static str,
        class: String,
        reason: String,
    },

    /// The bootstrap scan pool could not be constructed.
    #[error("Annotation scan pool unavailable: {0}")]
    Pool(String),
}
