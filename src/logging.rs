//! Tracing setup. Logs go to stderr so stdout only carries the results region.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` overrides the default `warn` level.
///
/// Safe to call more than once (later calls are no-ops).
pub fn init(verbose: bool) {
    let default = if verbose { "refurb=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
