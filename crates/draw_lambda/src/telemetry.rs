use tracing_subscriber::EnvFilter;

/// Installs the JSON subscriber used by the draw binaries. `RUST_LOG`
/// overrides the default `info` filter.
pub fn init_subscriber() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
