//! Tracing subscriber setup for hosts embedding the simulation.
//!
//! Filtering follows `RUST_LOG`; without it, `info` and above are printed to
//! stderr.

/// Installs the global subscriber, failing if one is already set.
pub fn try_init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
}

/// Installs the global subscriber unless another one is already active.
pub fn init() {
    if try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
