//! Error types for sync-bridge.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.

use std::time::Duration;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Type-erased error carried from a producer or operation.
///
/// Any `E: std::error::Error + Send + Sync + 'static` converts into this
/// without losing its concrete type, so callers can downcast back to it.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which bridge call produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeCall {
    /// [`collect_bounded`](crate::collect_bounded)
    Collect,
    /// [`invoke_blocking`](crate::invoke_blocking) and
    /// [`Bridge::invoke_with_signal`](crate::Bridge::invoke_with_signal)
    Invoke,
}

impl BridgeCall {
    /// Short name used in log fields and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collect => "collect_bounded",
            Self::Invoke => "invoke_blocking",
        }
    }
}

impl std::fmt::Display for BridgeCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The sequence failed before reaching the limit or its end.
    ///
    /// Elements received before the failure are discarded; `collected`
    /// records how many there were.
    #[error("sequence failed after {collected} of at most {limit} elements")]
    Sequence {
        collected: usize,
        limit: usize,
        #[source]
        source: BoxError,
    },

    /// The operation resolved with a failure.
    #[error("operation failed: {source}")]
    Operation {
        #[source]
        source: BoxError,
    },

    /// The configured deadline passed before the call completed.
    #[error("{call} timed out after {elapsed:?}")]
    Timeout { call: BridgeCall, elapsed: Duration },

    /// The producer or operation panicked while running on the bridge runtime.
    #[error("{call} panicked: {message}")]
    Panicked { call: BridgeCall, message: Box<str> },

    /// The runtime shut down before the producer or operation completed.
    #[error("{call} was cancelled by runtime shutdown")]
    Cancelled { call: BridgeCall },

    /// The operation dropped its completion signal without resolving it.
    #[error("operation dropped its completion signal without resolving it")]
    Abandoned,

    /// A borrowed runtime cannot run bridge calls.
    #[error("unsupported bridge runtime: {reason}")]
    UnsupportedRuntime { reason: &'static str },

    /// The bridge runtime could not be started.
    #[error("failed to build bridge runtime: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a sequence failure.
    pub fn sequence(collected: usize, limit: usize, source: impl Into<BoxError>) -> Self {
        Self::Sequence {
            collected,
            limit,
            source: source.into(),
        }
    }

    /// Create an operation failure.
    pub fn operation(source: impl Into<BoxError>) -> Self {
        Self::Operation {
            source: source.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(call: BridgeCall, elapsed: Duration) -> Self {
        Self::Timeout { call, elapsed }
    }

    /// Build an error from a failed task join.
    ///
    /// Panics become [`Error::Panicked`]; a task cancelled by runtime
    /// shutdown becomes [`Error::Cancelled`].
    pub(crate) fn task_failed(call: BridgeCall, err: tokio::task::JoinError) -> Self {
        let payload = match err.try_into_panic() {
            Ok(payload) => payload,
            Err(_) => return Self::Cancelled { call },
        };
        let message: Box<str> = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).into()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str().into()
        } else {
            "non-string panic payload".into()
        };
        Self::Panicked { call, message }
    }

    /// The bridge call this error came from, if it is tied to one.
    pub fn call(&self) -> Option<BridgeCall> {
        match self {
            Self::Sequence { .. } => Some(BridgeCall::Collect),
            Self::Operation { .. } | Self::Abandoned => Some(BridgeCall::Invoke),
            Self::Timeout { call, .. } => Some(*call),
            Self::Panicked { call, .. } | Self::Cancelled { call } => Some(*call),
            Self::UnsupportedRuntime { .. } | Self::Runtime { .. } => None,
        }
    }

    /// Borrow the producer's or operation's original error, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Sequence { source, .. } | Self::Operation { source } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Downcast the original error to a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.cause().and_then(|cause| cause.downcast_ref::<E>())
    }

    /// Take the original error out, if this error carries one.
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            Self::Sequence { source, .. } | Self::Operation { source } => Some(source),
            _ => None,
        }
    }
}
