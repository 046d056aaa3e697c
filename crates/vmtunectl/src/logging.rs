//! Logging setup for vmtunectl
//!
//! Diagnostics go to stderr through tracing. Quiet unless --verbose or
//! VMTUNE_LOG asks for more.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter, e.g. `VMTUNE_LOG=debug`
pub const LOG_ENV: &str = "VMTUNE_LOG";

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "error"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
