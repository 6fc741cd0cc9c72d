//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use sync_bridge::prelude::*;
//! ```
//!
//! This imports:
//! - The adapters: [`collect_bounded`], [`invoke_blocking`], [`Bridge`]
//! - Error handling: [`Error`], [`Result`], [`BoxError`]
//! - Providers: [`Provider`], [`Blocking`]
//! - Callback-style operations: [`CompletionSignal`]

pub use crate::bridge::Bridge;
pub use crate::error::{BoxError, Error, Result};
pub use crate::provider::{Blocking, Provider};
pub use crate::signal::CompletionSignal;
pub use crate::{collect_bounded, invoke_blocking};
