//! One-shot completion signal for callback-style operations.
//!
//! A [`CompletionSignal`] is the capability an operation uses to hand its
//! single resolution back to the blocked caller. Every resolving method takes
//! `self`, so a signal can be resolved at most once. A signal dropped without
//! being resolved is reported to the caller as [`Error::Abandoned`] rather
//! than leaving it blocked.

use tokio::sync::oneshot;

use crate::error::{BoxError, Error};

/// Sending half of a one-shot resolution channel.
///
/// Handed to the closure passed to
/// [`Bridge::invoke_with_signal`](crate::Bridge::invoke_with_signal).
#[derive(Debug)]
pub struct CompletionSignal<R, E = BoxError> {
    sender: oneshot::Sender<std::result::Result<R, E>>,
}

/// Receiving half, held by the blocked caller.
#[derive(Debug)]
pub(crate) struct Completion<R, E = BoxError> {
    receiver: oneshot::Receiver<std::result::Result<R, E>>,
}

/// Create a connected signal/completion pair.
pub(crate) fn completion_pair<R, E>() -> (CompletionSignal<R, E>, Completion<R, E>) {
    let (sender, receiver) = oneshot::channel();
    (CompletionSignal { sender }, Completion { receiver })
}

impl<R, E> CompletionSignal<R, E> {
    /// Resolve with the given outcome.
    ///
    /// Returns `false` if the caller is no longer waiting (for example after
    /// a timeout), in which case the outcome is dropped.
    pub fn complete(self, outcome: std::result::Result<R, E>) -> bool {
        self.sender.send(outcome).is_ok()
    }

    /// Resolve successfully.
    pub fn succeed(self, value: R) -> bool {
        self.complete(Ok(value))
    }

    /// Resolve with a failure.
    pub fn fail(self, error: E) -> bool {
        self.complete(Err(error))
    }

    /// Whether the caller has stopped waiting for this signal.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<R, E> Completion<R, E>
where
    E: Into<BoxError>,
{
    /// Wait for the resolution.
    ///
    /// `Err(None)` means the signal was dropped unresolved; the caller decides
    /// whether that was a panic or an abandoned signal.
    pub(crate) async fn wait(self) -> std::result::Result<R, Option<Error>> {
        match self.receiver.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Some(Error::operation(e))),
            Err(_) => Err(None),
        }
    }
}
