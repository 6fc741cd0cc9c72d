//! Provider capabilities and their blocking facade.
//!
//! A content provider exposes two capabilities: a stream of items for a page
//! and a single page-info lookup. How a provider fetches or parses anything is
//! its own business; the bridge only consumes these two shapes.
//!
//! [`Blocking`] wraps a provider so synchronous callers can use both
//! capabilities directly:
//!
//! ```rust
//! use sync_bridge::provider::{Blocking, BoxFuture, BoxStream, Provider};
//! use sync_bridge::{Bridge, BoxError};
//!
//! struct Numbers;
//!
//! impl Provider for Numbers {
//!     type Item = u32;
//!     type Info = String;
//!
//!     fn items(&self, _path: &str) -> BoxStream<'static, Result<u32, BoxError>> {
//!         Box::pin(futures::stream::iter((0..).map(Ok::<u32, BoxError>)))
//!     }
//!
//!     fn page_info(&self, path: &str) -> BoxFuture<'static, Result<String, BoxError>> {
//!         let path = path.to_owned();
//!         Box::pin(async move { Ok::<_, BoxError>(format!("numbers at {path}")) })
//!     }
//! }
//!
//! # fn example() -> sync_bridge::Result<()> {
//! let numbers = Blocking::new(Numbers, Bridge::new()?);
//! assert_eq!(numbers.items("/all", 3)?, vec![0, 1, 2]);
//! assert_eq!(numbers.page_info("/all")?, "numbers at /all");
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures_core::Stream;

use crate::bridge::Bridge;
use crate::error::{BoxError, Result};

/// Type alias for a boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type alias for a boxed, sendable stream.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Outcome of a provider capability, before it reaches the bridge.
pub type Fallible<T> = std::result::Result<T, BoxError>;

/// The two capabilities a content provider offers.
///
/// Returned streams and futures must be `'static`: they are moved onto the
/// bridge runtime, so copy whatever they need out of `&self` and `path`.
/// Dropping a returned stream must stop the work behind it.
pub trait Provider: Send + Sync {
    /// One element of a page's item stream (a post, a comment, ...).
    type Item: Send + 'static;
    /// Page metadata.
    type Info: Send + 'static;

    /// Items for `path`, in the order the provider discovers them.
    ///
    /// The stream may be unbounded.
    fn items(&self, path: &str) -> BoxStream<'static, Fallible<Self::Item>>;

    /// Page metadata for `path`.
    fn page_info(&self, path: &str) -> BoxFuture<'static, Fallible<Self::Info>>;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    type Item = P::Item;
    type Info = P::Info;

    fn items(&self, path: &str) -> BoxStream<'static, Fallible<Self::Item>> {
        (**self).items(path)
    }

    fn page_info(&self, path: &str) -> BoxFuture<'static, Fallible<Self::Info>> {
        (**self).page_info(path)
    }
}

/// Blocking view of a [`Provider`].
#[derive(Debug)]
pub struct Blocking<P> {
    provider: P,
    bridge: Arc<Bridge>,
}

impl<P: Provider> Blocking<P> {
    /// Wrap `provider`, running its work on `bridge`.
    pub fn new(provider: P, bridge: Bridge) -> Self {
        Self::with_shared(provider, Arc::new(bridge))
    }

    /// Wrap `provider`, sharing a bridge with other facades.
    pub fn with_shared(provider: P, bridge: Arc<Bridge>) -> Self {
        Self { provider, bridge }
    }

    /// Collect the first `limit` items for `path`.
    ///
    /// See [`Bridge::collect_bounded`].
    pub fn items(&self, path: &str, limit: usize) -> Result<Vec<P::Item>> {
        tracing::debug!(provider.path = path, bridge.limit = limit, "blocking items");
        self.bridge.collect_bounded(self.provider.items(path), limit)
    }

    /// Fetch page metadata for `path`.
    ///
    /// See [`Bridge::invoke_blocking`].
    pub fn page_info(&self, path: &str) -> Result<P::Info> {
        tracing::debug!(provider.path = path, "blocking page info");
        self.bridge.invoke_blocking(self.provider.page_info(path))
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The bridge this facade runs on.
    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    /// Unwrap the provider.
    pub fn into_inner(self) -> P {
        self.provider
    }
}
