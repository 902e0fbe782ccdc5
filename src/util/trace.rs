//! Installs a `tracing_subscriber` formatter so that the `log`
//! records emitted while resolving ways are visible to an ingest
//! tool that already uses `tracing`.
//!
//! Filtering follows the environment, for example:
//! ```bash
//! RUST_LOG=way_attributes=trace
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
///
/// Returns `false` when a global subscriber was already installed.
pub fn initialize_tracer() -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
