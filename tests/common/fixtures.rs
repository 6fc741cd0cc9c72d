//! Common test fixtures.

use std::sync::Once;

/// Error produced by test streams and operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to fetch element {index}")]
pub struct PageError {
    pub index: u32,
}

/// Install a tracing subscriber once per test binary.
///
/// Filtered by `RUST_LOG` (default: `sync_bridge=debug`), written through
/// the test harness so output only shows for failing tests.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sync_bridge=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
