//! # sync-bridge
//!
//! Blocking adapters for async producers.
//!
//! Synchronous code often needs values from an async API: the first few items
//! of an async stream, or the result of a single async call. This crate
//! provides two adapters for that:
//!
//! - [`collect_bounded`] pulls at most `n` elements out of a
//!   [`Stream`](futures_core::Stream) into a `Vec`, then cancels the stream by
//!   dropping it on the runtime that was polling it.
//! - [`invoke_blocking`] runs a future to completion and returns its value,
//!   or the original error wrapped in [`Error::Operation`].
//!
//! Both run the async side on a tokio multi-thread runtime while the calling
//! thread blocks. The free functions build a runtime per call; create a
//! [`Bridge`] once and reuse it when calling repeatedly.
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::stream;
//!
//! # fn example() -> sync_bridge::Result<()> {
//! let posts = stream::iter((1..=25).map(Ok::<u32, std::io::Error>));
//! let first = sync_bridge::collect_bounded(posts, 10)?;
//! assert_eq!(first, (1..=10).collect::<Vec<_>>());
//!
//! let info = sync_bridge::invoke_blocking(async { Ok::<_, std::io::Error>("page info") })?;
//! assert_eq!(info, "page info");
//! # Ok(())
//! # }
//! ```
//!
//! ## Reusing a Bridge
//!
//! ```rust
//! use std::time::Duration;
//! use sync_bridge::Bridge;
//!
//! # fn example() -> sync_bridge::Result<()> {
//! let bridge = Bridge::builder()
//!     .worker_threads(2)
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let a = bridge.invoke_blocking(async { Ok::<_, std::io::Error>(1) })?;
//! let b = bridge.invoke_blocking(async { Ok::<_, std::io::Error>(2) })?;
//! assert_eq!(a + b, 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failures
//!
//! Errors from the stream or future are passed through as the `source` of
//! [`Error::Sequence`] / [`Error::Operation`] and can be recovered with
//! [`Error::downcast_ref`]. When a stream fails part-way, the elements
//! received before the failure are discarded.
//!
//! ## Blocking Context
//!
//! All blocking entry points panic when called from inside an async execution
//! context, because blocking a runtime thread would deadlock it. From async
//! code, reach the bridge through `tokio::task::spawn_blocking`.
//!
//! ## Tracing
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events with
//! `bridge.*` fields: `debug` at call boundaries and failures, `trace` per
//! element. No subscriber is installed by the library.

pub mod bridge;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod signal;

pub use bridge::{Bridge, BridgeBuilder, BridgeConfig};
pub use error::{BoxError, BridgeCall, Error, Result};
pub use signal::CompletionSignal;

use std::future::Future;

use futures_core::Stream;

/// Collect at most `limit` elements from `stream`, blocking the calling thread.
///
/// Builds a default [`Bridge`] for this call only. With `limit == 0` no
/// runtime is built and the stream is dropped unpolled.
///
/// See [`Bridge::collect_bounded`] for errors and panics.
pub fn collect_bounded<S, T, E>(stream: S, limit: usize) -> Result<Vec<T>>
where
    S: Stream<Item = std::result::Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    if limit == 0 {
        return Ok(Vec::new());
    }
    Bridge::new()?.collect_bounded(stream, limit)
}

/// Run `operation` to completion, blocking the calling thread.
///
/// Builds a default [`Bridge`] for this call only.
///
/// See [`Bridge::invoke_blocking`] for errors and panics.
pub fn invoke_blocking<F, R, E>(operation: F) -> Result<R>
where
    F: Future<Output = std::result::Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    Bridge::new()?.invoke_blocking(operation)
}
