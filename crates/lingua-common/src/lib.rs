//! # Lingua Common
//!
//! Logging bootstrap and shared test utilities for the Lingua workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig, LoggingError};
