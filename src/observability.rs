use tracing_subscriber::EnvFilter;

/// JSON logs to stdout, filtered by `RUST_LOG` (default `info`).
///
/// Timestamps are left to CloudWatch. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .without_time()
        .with_ansi(false)
        .try_init();
}
