//! # sc-runtime
//!
//! Application-scoped wiring: reads the validated [`WebConfig`], selects
//! the state-saving strategy, and owns the annotation registry. The
//! surrounding request-dispatch layer holds one [`ApplicationRuntime`] for
//! the life of the deployment and hands out references per request.

pub mod runtime;
pub mod telemetry;

pub use runtime::{ApplicationRuntime, RuntimeError};
pub use shared_types::WebConfig;
