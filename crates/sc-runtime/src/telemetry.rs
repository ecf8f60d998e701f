//! Process-wide tracing setup.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global fmt subscriber, filtered through `RUST_LOG`.
///
/// Safe to call more than once; only the first installation wins.
pub fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
