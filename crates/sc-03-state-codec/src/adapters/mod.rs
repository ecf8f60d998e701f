//! Driven-side adapters.

pub mod bincode_provider;

pub use bincode_provider::BincodeProvider;
