//! Logging initialization
//!
//! Events go to stderr so stdout stays reserved for the rendered output.
//! `RUST_LOG` takes precedence over the level derived from the CLI flags.

use crate::output::Verbosity;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "depdiff=warn",
        Verbosity::Verbose => "depdiff=debug",
    }
}

/// Install the global `fmt` subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
