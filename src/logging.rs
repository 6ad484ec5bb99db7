//! Logging setup for library consumers
//!
//! Embedding applications usually install their own `tracing` subscriber;
//! this helper exists for quick scripts and tests.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Initialize stderr logging with an env-filter
///
/// `RUST_LOG` overrides the default level. Returns an error if a global
/// subscriber is already installed.
pub fn init_logging(default_level: Level) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(true);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Best-effort initialization for tests; ignores an already-set subscriber
pub fn init_for_tests() {
    let _ = init_logging(Level::DEBUG);
}
