//! Logging initialization
//!
//! Called once by the hosting binary before any core service starts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise defaults to debug output for this
/// crate and info for everything else.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notebin=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
