#![forbid(unsafe_code)]

//! Subscriber setup for the `coursetree` binary.
//!
//! The filter comes from `COURSETREE_LOG`, then `RUST_LOG`, then `warn`.
//! Output always goes to stderr so stdout stays clean for tree output.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Primary filter variable.
pub const LOG_ENV: &str = "COURSETREE_LOG";

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the event filter from the environment.
#[must_use]
pub fn env_filter() -> EnvFilter {
    filter_from(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    )
}

fn filter_from(primary: Option<String>, fallback: Option<String>) -> EnvFilter {
    primary
        .into_iter()
        .chain(fallback)
        .filter(|directives| !directives.trim().is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn install(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
