//! Instrumented stream for observing what the collector does to a producer.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use futures_core::Stream;
use tokio::time::Sleep;

use super::fixtures::PageError;

/// Shared view of a [`ProbeStream`]'s activity.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    fetched: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
}

impl Probe {
    /// Number of elements the stream has produced (including a failing one).
    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }

    /// Whether the stream has been dropped.
    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Stream of `0..len` (or unbounded) that records fetches and its own drop.
pub struct ProbeStream {
    probe: Probe,
    next: u32,
    len: Option<u32>,
    fail_at: Option<u32>,
    delay: Option<Duration>,
    pending: Option<Pin<Box<Sleep>>>,
}

impl ProbeStream {
    /// A stream yielding `0..len`.
    pub fn finite(len: u32) -> (Self, Probe) {
        Self::build(Some(len))
    }

    /// A stream that never ends.
    pub fn unbounded() -> (Self, Probe) {
        Self::build(None)
    }

    fn build(len: Option<u32>) -> (Self, Probe) {
        let probe = Probe::default();
        let stream = Self {
            probe: probe.clone(),
            next: 0,
            len,
            fail_at: None,
            delay: None,
            pending: None,
        };
        (stream, probe)
    }

    /// Yield a [`PageError`] instead of element `index`.
    pub fn failing_at(mut self, index: u32) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Wait `delay` before each element.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl Stream for ProbeStream {
    type Item = Result<u32, PageError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.len.is_some_and(|len| self.next >= len) {
            return Poll::Ready(None);
        }

        if let Some(delay) = self.delay {
            let sleep = self
                .pending
                .get_or_insert_with(|| Box::pin(tokio::time::sleep(delay)));
            if sleep.as_mut().poll(cx).is_pending() {
                return Poll::Pending;
            }
            self.pending = None;
        }

        let index = self.next;
        self.next += 1;
        self.probe.fetched.fetch_add(1, Ordering::SeqCst);

        if self.fail_at == Some(index) {
            return Poll::Ready(Some(Err(PageError { index })));
        }
        Poll::Ready(Some(Ok(index)))
    }
}

impl Drop for ProbeStream {
    fn drop(&mut self) {
        self.probe.released.store(true, Ordering::SeqCst);
    }
}
