//! Error types for internationalization operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading catalogs or resolving locales
#[derive(Error, Debug)]
pub enum I18nError {
    /// No locales directory was configured
    #[error("Locales directory not set")]
    DirectoryNotConfigured,

    /// The configured locales directory does not exist
    #[error("Locales directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Directory that was looked up
        path: PathBuf,
    },

    /// A locale data file could not be parsed
    #[error("Failed to parse locale file {}: {source}", path.display())]
    PayloadParseError {
        /// Data file being parsed
        path: PathBuf,
        /// Deserializer or template error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A locale data file or directory could not be read
    #[error("Failed to load resource {}: {source}", path.display())]
    ResourceLoadError {
        /// File or directory being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No compiled catalog entry exists for the locale
    #[error("Locale not found: {locale}")]
    LocaleNotFound {
        /// Locale name as requested
        locale: String,
    },

    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),
}

impl I18nError {
    /// Create a payload parse error for the given file
    pub fn payload(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::PayloadParseError {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a locale-not-found error
    pub fn locale_not_found(locale: impl Into<String>) -> Self {
        Self::LocaleNotFound {
            locale: locale.into(),
        }
    }

    /// Whether this error happened while loading catalogs rather than on lookup
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotConfigured
                | Self::DirectoryNotFound { .. }
                | Self::PayloadParseError { .. }
                | Self::ResourceLoadError { .. }
        )
    }
}

/// Errors building a plural template from its raw cases
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluralCaseError {
    /// An `=N` case whose value is not a number
    #[error("invalid exact plural case: {case}")]
    InvalidExactValue {
        /// Case key as written
        case: String,
    },

    /// A case key that is neither `=N` nor a CLDR category keyword
    #[error("unknown plural category: {case}")]
    UnknownCategory {
        /// Case key as written
        case: String,
    },

    /// The template defines no cases at all
    #[error("plural template has no cases")]
    NoCases,
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
