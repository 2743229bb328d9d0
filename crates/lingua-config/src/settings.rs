//! Configuration schema

use lingua_common::LoggingConfig;
use lingua_i18n::{I18n, I18nOptions};
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog construction options
    pub i18n: I18nOptions,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl Config {
    /// An uninitialized [`I18n`] built from these options
    pub fn build_i18n(&self) -> I18n {
        I18n::with_options(&self.i18n)
    }
}
