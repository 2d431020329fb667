//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_level`. Calling this again after a
/// subscriber is installed is a no-op.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();

    if result.is_ok() {
        tracing::debug!("Logging initialized (default level: {})", default_level);
    }
}
