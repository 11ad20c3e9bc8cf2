use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "perf_scorer=debug,tower_http=debug,info"
    } else {
        "info"
    }
}

/// Initialize tracing. Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug) // Show target module in debug mode
        .with_writer(std::io::stderr)
        .init();

    debug!("perf-scorer started with debug logging");
}
