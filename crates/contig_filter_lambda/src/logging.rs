use tracing_subscriber::EnvFilter;

/// Install the process-wide `fmt` subscriber. `RUST_LOG` overrides the default
/// `info` filter. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
