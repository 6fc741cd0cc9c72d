//! Builder for [`Bridge`].

use std::time::Duration;

use crate::error::{Error, Result};

use super::{Bridge, BridgeConfig};

/// Builder for [`Bridge`].
///
/// Created via [`Bridge::builder()`].
///
/// ```rust
/// use std::time::Duration;
/// use sync_bridge::Bridge;
///
/// # fn example() -> sync_bridge::Result<()> {
/// let bridge = Bridge::builder()
///     .worker_threads(2)
///     .thread_name("scraper-bridge")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BridgeBuilder {
    config: BridgeConfig,
}

impl BridgeBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of runtime worker threads (values below 1 are raised to 1).
    pub fn worker_threads(mut self, count: usize) -> Self {
        self.config.worker_threads = count.max(1);
        self
    }

    /// Set the name of runtime worker threads.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    /// Apply a deadline to every call made through the bridge.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Remove any deadline (the default).
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Build the bridge with its own runtime.
    pub fn build(self) -> Result<Bridge> {
        tracing::debug!(
            bridge.worker_threads = self.config.worker_threads,
            bridge.thread_name = %self.config.thread_name,
            bridge.timeout = ?self.config.timeout,
            "building bridge runtime"
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .thread_name(self.config.thread_name.clone())
            .enable_time()
            .build()
            .map_err(|source| Error::Runtime { source })?;

        Ok(Bridge::from_runtime(runtime, self.config))
    }

    /// Build a bridge on an existing runtime.
    ///
    /// See [`Bridge::from_handle`] for the runtimes this rejects.
    pub fn build_with_handle(self, handle: tokio::runtime::Handle) -> Result<Bridge> {
        Bridge::from_handle(handle, self.config)
    }
}
