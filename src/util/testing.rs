//! Test-only tracing setup shared by unit and integration tests.

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process.
///
/// `RUST_LOG` selects the filter; without it everything from this crate is
/// traced, including span close events from `#[instrument]`.
pub fn init_test_setup() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokedex=trace"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        // Another harness may have installed a global subscriber first
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test tracing not installed: {}", e);
        }
        tracing::debug!("test tracing ready");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_calls_when_init_then_installs_once() {
        init_test_setup();
        init_test_setup();
        tracing::trace!(entries = 3, "still logging after second init");
    }
}
