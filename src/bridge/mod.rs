//! The blocking bridge and its execution context.
//!
//! A [`Bridge`] owns (or borrows) a tokio multi-thread runtime. Producers and
//! operations run on its worker threads while the calling thread blocks.
//!
//! ```rust
//! use sync_bridge::Bridge;
//!
//! # fn example() -> sync_bridge::Result<()> {
//! let bridge = Bridge::new()?;
//! let answer = bridge.invoke_blocking(async { Ok::<_, std::io::Error>(42) })?;
//! assert_eq!(answer, 42);
//! # Ok(())
//! # }
//! ```

mod builder;
mod collect;
mod invoke;

pub use builder::BridgeBuilder;

use std::future::Future;
use std::time::Duration;

use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::error::{Error, Result};

/// Default name for runtime worker threads.
pub const DEFAULT_THREAD_NAME: &str = "sync-bridge-worker";

/// Configuration for a [`Bridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Worker threads for an owned runtime (default: 1, minimum: 1).
    pub worker_threads: usize,
    /// Name given to worker threads (default: `sync-bridge-worker`).
    pub thread_name: String,
    /// Deadline applied to every call (default: none).
    ///
    /// Without a timeout a hanging producer or operation blocks the caller
    /// indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            timeout: None,
        }
    }
}

enum Executor {
    Owned(Runtime),
    Borrowed(Handle),
}

/// Blocking entry point for async producers and operations.
///
/// `Bridge` is `Send + Sync`; share it between threads to avoid building a
/// runtime per call. Each call allocates its own channel and signal, so
/// concurrent calls never observe each other.
///
/// # Panics
///
/// Every blocking method panics if called from inside an async execution
/// context (a runtime worker or a `block_on` future). Use
/// `tokio::task::spawn_blocking` to reach the bridge from async code.
/// Dropping a bridge that owns its runtime has the same restriction.
pub struct Bridge {
    executor: Executor,
    config: BridgeConfig,
}

impl Bridge {
    /// Create a bridge with the default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start building a bridge.
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    /// Run on an existing multi-thread runtime instead of owning one.
    ///
    /// `worker_threads` and `thread_name` from `config` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRuntime`] if `handle` belongs to a
    /// current-thread runtime, whose spawned tasks never run while the caller
    /// blocks, or if `config` sets a timeout and the runtime was built
    /// without `enable_time`.
    pub fn from_handle(handle: Handle, config: BridgeConfig) -> Result<Self> {
        if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(Error::UnsupportedRuntime {
                reason: "current-thread runtimes cannot run tasks for a blocked caller",
            });
        }
        if config.timeout.is_some() && !timers_enabled(&handle) {
            return Err(Error::UnsupportedRuntime {
                reason: "a timeout needs a runtime built with `enable_time`",
            });
        }

        Ok(Self {
            executor: Executor::Borrowed(handle),
            config,
        })
    }

    pub(crate) fn from_runtime(runtime: Runtime, config: BridgeConfig) -> Self {
        Self {
            executor: Executor::Owned(runtime),
            config,
        }
    }

    /// The bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Handle to the runtime producers and operations are spawned on.
    pub fn handle(&self) -> &Handle {
        match &self.executor {
            Executor::Owned(runtime) => runtime.handle(),
            Executor::Borrowed(handle) => handle,
        }
    }

    /// Whether this bridge owns its runtime.
    pub fn owns_runtime(&self) -> bool {
        matches!(self.executor, Executor::Owned(_))
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match &self.executor {
            Executor::Owned(runtime) => runtime.block_on(future),
            Executor::Borrowed(handle) => handle.block_on(future),
        }
    }
}

/// Whether the runtime behind `handle` has a time driver.
///
/// Tokio exposes no query for this; creating a timer without one panics.
fn timers_enabled(handle: &Handle) -> bool {
    let _guard = handle.enter();
    std::panic::catch_unwind(|| drop(tokio::time::sleep(Duration::ZERO))).is_ok()
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("owns_runtime", &self.owns_runtime())
            .field("config", &self.config)
            .finish()
    }
}
