//! # sc-04-annotation-cache
//!
//! Concurrent, memoized resolution of runtime annotations: each annotated
//! class is scanned exactly once per processing kind, application-wide, and
//! the resulting handler map is cached for the life of the registry.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): class descriptors, declared-annotation
//!   data, processing-target kinds and their scanner sets
//! - **Ports Layer** (`ports/`): `Scanner` (resolution strategy) and
//!   `RuntimeAnnotationHandler` (deferred application) contracts
//! - **Service Layer** (`service/`): the single-flight cache and the
//!   bounded bootstrap scan pool
//! - **Adapters Layer** (`adapters/`): the built-in scanners and handlers
//!   (resource dependencies, listener subscriptions)
//!
//! ## Failure Policy
//!
//! Scan failures are configuration-fatal: they propagate to every caller
//! coalesced on the same class and the entry is evicted so a corrected
//! deployment can retry. Handler-apply failures are request-scoped and
//! stage-dependent: swallowed with a log line in Production, surfaced to
//! the developer in Development.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::{ListenerForScanner, ResourceDependencyScanner};
pub use domain::{AnnotationType, ClassMetadata, DeclaredAnnotation, ProcessingTarget};
pub use errors::AnnotationError;
pub use ports::{AnnotatedInstance, HandlerMap, RuntimeAnnotationHandler, Scanner};
pub use service::AnnotationCache;
