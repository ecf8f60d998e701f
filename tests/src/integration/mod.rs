//! Cross-crate integration flows.

pub mod annotation_flows;
pub mod crypto_flows;
pub mod state_flows;
