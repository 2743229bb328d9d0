//! # Lingua Config
//!
//! Configuration for Lingua applications: locale catalog options and
//! logging, read from YAML or TOML files with `LINGUA_*` environment
//! overrides.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::Config;
