//! Development-time tracing for debugging tree construction and runs.
//!
//! Diagnostics (leaves submitted, duplicate `then` overwrites, construction
//! stats) go to stderr via `RUST_LOG` and are never part of a collector's
//! product output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize a tracing subscriber for development logging.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset. Output: stderr, compact
/// format. Embedders that already install a subscriber should skip this.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
