//! Host-facing output for user-visible datafeed messages.

use tracing::warn;

/// Receives messages meant for the host framework's user (init failures and
/// similar).
pub trait Reporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Forwards every message to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str) {
        warn!(target: "nasdaqdata_datafeed::reporter", "{message}");
    }
}

impl<F> Reporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, message: &str) {
        self(message)
    }
}
