//! The single-flight resolution service.

pub mod cache;

pub use cache::AnnotationCache;
