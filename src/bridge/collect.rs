//! Bounded collection of async streams.

use std::future::poll_fn;
use std::pin::pin;

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{BoxError, BridgeCall, Error, Result};

use super::Bridge;

/// Upper bound on the up-front allocation for the accumulator.
const MAX_PREALLOCATED: usize = 1024;

/// Why the producer task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finish {
    /// `limit` elements were handed over; the stream was not polled again.
    Limit,
    /// The stream ended on its own.
    Exhausted,
    /// The stream yielded an error.
    Failed,
    /// The consumer went away (timeout or failure on its side).
    Cancelled,
}

impl Bridge {
    /// Collect at most `limit` elements from `stream`, blocking the calling thread.
    ///
    /// The stream is polled on a runtime worker, one element at a time, and
    /// handed over through a one-slot channel. Once `limit` elements have been
    /// produced the stream is dropped without being polled again, and the
    /// producer task is joined before this returns, so anything the stream
    /// releases on drop has been released by then.
    ///
    /// With `limit == 0` the stream is dropped without ever being polled.
    ///
    /// # Errors
    ///
    /// - [`Error::Sequence`] if the stream yields an error before the limit
    ///   or its end. Elements collected before the error are discarded.
    /// - [`Error::Timeout`] if a timeout is configured and expires.
    /// - [`Error::Panicked`] if polling the stream panics.
    /// - [`Error::Cancelled`] if a borrowed runtime shuts down first.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an async execution context.
    pub fn collect_bounded<S, T, E>(&self, stream: S, limit: usize) -> Result<Vec<T>>
    where
        S: Stream<Item = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<BoxError> + Send + 'static,
    {
        if limit == 0 {
            tracing::trace!(bridge.limit = 0, "zero limit, stream not started");
            return Ok(Vec::new());
        }

        let timeout = self.config.timeout;
        let handle = self.handle().clone();

        tracing::debug!(
            bridge.call = %BridgeCall::Collect,
            bridge.limit = limit,
            bridge.timeout = ?timeout,
            "collecting bounded stream"
        );

        self.block_on(async move {
            let (tx, mut rx) = mpsc::channel(1);
            let token = CancellationToken::new();
            let producer = handle.spawn(produce(stream, limit, tx, token.clone()));

            let mut items = Vec::with_capacity(limit.min(MAX_PREALLOCATED));
            let drained = match timeout {
                Some(deadline) => tokio::time::timeout(deadline, drain(&mut rx, limit, &mut items))
                    .await
                    .map_err(|_| Error::timeout(BridgeCall::Collect, deadline)),
                None => Ok(drain(&mut rx, limit, &mut items).await),
            };

            // Unblock a producer parked in `send` or waiting on the stream.
            token.cancel();
            drop(rx);

            let finish = match producer.await {
                Ok(finish) => finish,
                Err(e) => {
                    tracing::debug!(
                        bridge.call = %BridgeCall::Collect,
                        bridge.collected = items.len(),
                        error = %e,
                        "stream producer did not complete"
                    );
                    return Err(Error::task_failed(BridgeCall::Collect, e));
                }
            };

            tracing::debug!(
                bridge.call = %BridgeCall::Collect,
                bridge.collected = items.len(),
                bridge.limit = limit,
                finish = ?finish,
                "stream producer finished"
            );

            match drained? {
                None => Ok(items),
                Some(source) => Err(Error::sequence(items.len(), limit, source)),
            }
        })
    }
}

/// Poll `stream` until `limit` elements are sent, it ends, it fails, or the
/// consumer cancels. The stream is dropped when this returns.
async fn produce<S, T, E>(
    stream: S,
    limit: usize,
    tx: mpsc::Sender<std::result::Result<T, E>>,
    token: CancellationToken,
) -> Finish
where
    S: Stream<Item = std::result::Result<T, E>>,
{
    let mut stream = pin!(stream);
    let mut sent = 0usize;

    loop {
        if sent == limit {
            return Finish::Limit;
        }

        let next = tokio::select! {
            biased;
            () = token.cancelled() => None,
            next = poll_fn(|cx| stream.as_mut().poll_next(cx)) => Some(next),
        };

        match next {
            None => return Finish::Cancelled,
            Some(None) => return Finish::Exhausted,
            Some(Some(Ok(item))) => {
                tracing::trace!(bridge.index = sent, "stream produced element");
                if tx.send(Ok(item)).await.is_err() {
                    return Finish::Cancelled;
                }
                sent += 1;
            }
            Some(Some(Err(e))) => {
                tracing::trace!(bridge.index = sent, "stream produced error");
                let _ = tx.send(Err(e)).await;
                return Finish::Failed;
            }
        }
    }
}

/// Move elements from the channel into `items` until `limit` is reached or
/// the producer hangs up. Returns the stream error, if one arrived.
async fn drain<T, E>(
    rx: &mut mpsc::Receiver<std::result::Result<T, E>>,
    limit: usize,
    items: &mut Vec<T>,
) -> Option<E> {
    while items.len() < limit {
        match rx.recv().await? {
            Ok(item) => items.push(item),
            Err(e) => return Some(e),
        }
    }
    None
}
