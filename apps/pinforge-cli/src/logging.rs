// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber, written to stderr
// so that stdout stays clean for quote output.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from config) is used.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
