//! Blocking invocation of async operations.

use std::future::Future;

use crate::error::{BoxError, BridgeCall, Error, Result};
use crate::signal::{CompletionSignal, completion_pair};

use super::Bridge;

impl Bridge {
    /// Run `operation` to completion on the bridge runtime and return its value.
    ///
    /// The calling thread blocks until the operation resolves. The value is
    /// returned unchanged; a failure is returned as [`Error::Operation`] with
    /// the original error as its source.
    ///
    /// # Errors
    ///
    /// - [`Error::Operation`] if the operation resolves with an error.
    /// - [`Error::Panicked`] if the operation panics.
    /// - [`Error::Cancelled`] if a borrowed runtime shuts down first.
    /// - [`Error::Timeout`] if a timeout is configured and expires. The
    ///   operation is aborted at its next suspension point.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an async execution context.
    pub fn invoke_blocking<F, R, E>(&self, operation: F) -> Result<R>
    where
        F: Future<Output = std::result::Result<R, E>> + Send + 'static,
        R: Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        self.invoke_with_signal(move |signal| async move {
            signal.complete(operation.await);
        })
    }

    /// Run a callback-style operation that reports through a [`CompletionSignal`].
    ///
    /// `operation` is called on a runtime worker thread with a fresh signal.
    /// The calling thread blocks until the signal is resolved. Work the
    /// operation keeps doing after resolving keeps running on the runtime
    /// and is not waited for.
    ///
    /// ```rust
    /// use sync_bridge::{Bridge, CompletionSignal};
    ///
    /// # fn example() -> sync_bridge::Result<()> {
    /// let bridge = Bridge::new()?;
    /// let len = bridge.invoke_with_signal(
    ///     |signal: CompletionSignal<usize, std::io::Error>| async move {
    ///         signal.succeed("resolved".len());
    ///     },
    /// )?;
    /// assert_eq!(len, 8);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// As [`invoke_blocking`](Self::invoke_blocking), plus [`Error::Abandoned`]
    /// if the operation finishes without resolving the signal.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an async execution context.
    pub fn invoke_with_signal<Op, Fut, R, E>(&self, operation: Op) -> Result<R>
    where
        Op: FnOnce(CompletionSignal<R, E>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
        R: Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        let timeout = self.config.timeout;
        let handle = self.handle().clone();

        tracing::debug!(
            bridge.call = %BridgeCall::Invoke,
            bridge.timeout = ?timeout,
            "invoking operation"
        );

        self.block_on(async move {
            let (signal, completion) = completion_pair();
            let task = handle.spawn(async move { operation(signal).await });

            let resolved = match timeout {
                Some(deadline) => match tokio::time::timeout(deadline, completion.wait()).await {
                    Ok(resolved) => resolved,
                    Err(_) => {
                        task.abort();
                        tracing::debug!(
                            bridge.call = %BridgeCall::Invoke,
                            bridge.timeout = ?deadline,
                            "operation timed out"
                        );
                        return Err(Error::timeout(BridgeCall::Invoke, deadline));
                    }
                },
                None => completion.wait().await,
            };

            match resolved {
                Ok(value) => Ok(value),
                Err(Some(err)) => {
                    tracing::debug!(
                        bridge.call = %BridgeCall::Invoke,
                        error = %err,
                        "operation failed"
                    );
                    Err(err)
                }
                // Signal dropped unresolved; the task outcome says why.
                Err(None) => match task.await {
                    Err(e) => {
                        tracing::debug!(
                            bridge.call = %BridgeCall::Invoke,
                            panicked = e.is_panic(),
                            "operation task did not complete"
                        );
                        Err(Error::task_failed(BridgeCall::Invoke, e))
                    }
                    Ok(()) => {
                        tracing::debug!(
                            bridge.call = %BridgeCall::Invoke,
                            "operation abandoned its completion signal"
                        );
                        Err(Error::Abandoned)
                    }
                },
            }
        })
    }
}
