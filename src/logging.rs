//! Tracing subscriber initialization.
//!
//! Diagnostics go to stderr so they never interleave with formatted command
//! output on stdout. Respects `RUST_LOG`; defaults to `warn` so a normal run
//! prints nothing but the command's logs.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
