use tracing_subscriber::{EnvFilter, fmt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - Uses `RUST_LOG` for filtering (defaults to "info" if not set)
/// - Configures JSON output format for structured logging
/// - Flattens event fields for cleaner log output
pub fn init_logging() {
    fmt()
        .with_env_filter(env_filter())
        .json()
        .flatten_event(true)
        .init();
}

/// Human readable logs on stderr, for commands that own stdout.
pub fn init_stderr_logging() {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}
