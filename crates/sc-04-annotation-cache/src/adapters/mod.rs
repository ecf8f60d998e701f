//! Built-in scanners and the handlers they produce.

pub mod handlers;
pub mod scanners;

pub use handlers::{ListenerForHandler, ResourceDependencyHandler};
pub use scanners::{ListenerForScanner, ResourceDependencyScanner};
