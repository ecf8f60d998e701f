//! Domain layer: pure state-identity and storage logic, no I/O.

pub mod ids;
pub mod store;
pub mod token;

pub use ids::IdGenerator;
pub use store::{SavedState, SessionViewStore, ViewEntry};
pub use token::CompositeToken;
