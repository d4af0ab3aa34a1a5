//! Tracing/logging setup shared by the API binary and tests.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide logging.
///
/// Level is configurable via `RUST_LOG` (default `info`). Output is JSON
/// lines to stdout unless `LOG_FORMAT=text` asks for a compact
/// human-readable form. Safe to call multiple times; subsequent calls are
/// no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = if std::env::var("LOG_FORMAT").as_deref() == Ok("text") {
        builder.compact().try_init()
    } else {
        builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init()
    };
}
