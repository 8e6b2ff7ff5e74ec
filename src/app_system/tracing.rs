use tracing_subscriber::EnvFilter;

/// Centralized tracing configuration. Call once at startup; honors
/// `RUST_LOG`, defaulting to info.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
