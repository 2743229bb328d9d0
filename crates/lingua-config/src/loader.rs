//! Configuration loading utilities

use crate::Config;
use lingua_common::LogFormat;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Files looked up in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["lingua.yaml", "lingua.yml", "lingua.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The file extension names no supported format
    #[error("Unsupported configuration format: {}", path.display())]
    UnsupportedFormat {
        /// Configuration file path
        path: PathBuf,
    },

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure for the variable's value
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Invalid configuration value {field}: {message}")]
    ValidationError {
        /// Dotted field path
        field: String,
        /// What is wrong with the value
        message: String,
    },
}

impl ConfigError {
    /// Create a validation error for a dotted field path
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path.as_ref(), |var| env::var(var).ok())
    }

    /// Load configuration from `LINGUA_CONFIG_PATH`, a default file in the
    /// working directory, or defaults
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_with(Path::new("."), |var| env::var(var).ok())
    }

    /// [`load`](Self::load) with an explicit working directory and environment
    pub fn load_with<F>(dir: &Path, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("LINGUA_CONFIG_PATH") {
            return Self::load_config_with(Path::new(&path), lookup);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
        {
            return Self::load_config_with(&path, lookup);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    /// [`load_config`](Self::load_config) with an explicit environment
    pub fn load_config_with<F>(path: &Path, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from {:?}", path);
        let mut config = Self::parse_file(path)?;
        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_yaml::from_str(&content)?)
            }
            Some("toml") => {
                let content = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&content)?)
            }
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Apply `LINGUA_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("LINGUA_DEFAULT_LOCALE") {
            config.i18n.default_locale = Some(locale);
        }

        if let Some(dir) = lookup("LINGUA_LOCALES_DIR") {
            config.i18n.locales_dir = PathBuf::from(dir);
        }

        if let Some(locale) = lookup("LINGUA_FALLBACK_LOCALE") {
            config.i18n.fallback_locale = Some(locale);
        }

        if let Some(level) = lookup("LINGUA_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("LINGUA_LOG_FORMAT") {
            config.logging.format =
                format
                    .parse::<LogFormat>()
                    .map_err(|message| ConfigError::EnvParseError {
                        var: "LINGUA_LOG_FORMAT".to_string(),
                        source: message.into(),
                    })?;
        }

        if let Some(file) = lookup("LINGUA_LOG_FILE") {
            config.logging.file_path = (!file.is_empty()).then(|| PathBuf::from(file));
        }

        if let Some(targets) = lookup("LINGUA_LOG_INCLUDE_TARGETS") {
            config.logging.include_targets =
                targets.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "LINGUA_LOG_INCLUDE_TARGETS".to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(())
    }
}
