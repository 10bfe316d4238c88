pub mod entities;

// Re-export tracing for use in this crate
pub use tracing;

// Initialize tracing if not already initialized.
// The server binary installs its own subscriber; this is for tools that
// use the entities directly. Log level comes from RUST_LOG.
#[cfg(not(test))]
pub fn init_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("model=info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}
