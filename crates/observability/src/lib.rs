//! Process-wide tracing setup for the panel binary.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info` with the noisy
/// HTTP-client internals turned down. Output is one JSON object per line;
/// set `MILLADMIN_LOG_PRETTY` for human-readable output during development.
/// Calling this more than once is harmless; only the first call installs.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if std::env::var_os("MILLADMIN_LOG_PRETTY").is_some() {
        let _ = builder.pretty().try_init();
    } else {
        let _ = builder.json().try_init();
    }
}
