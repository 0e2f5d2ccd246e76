//! Tracing setup
//!
//! Log events go to stderr; stdout is reserved for the console report.
//! `RUST_LOG` overrides the default `info` level.

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

fn filter_layer() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_subscriber() -> Result<(), tracing_subscriber::util::TryInitError> {
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer())
        .with(fmt_layer)
        .try_init()
}

/// Install a thread-local subscriber for tests.
///
/// The returned guard restores the previous subscriber when dropped, so test
/// threads do not conflict.
#[must_use]
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    tracing_subscriber::registry()
        .with(filter_layer())
        .with(fmt_layer)
        .set_default()
}
