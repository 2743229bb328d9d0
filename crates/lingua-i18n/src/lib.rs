//! # Lingua I18n
//!
//! Locale catalogs and printf-style message translation.
//!
//! Locale data files (JSON, YAML or TOML) are loaded once from a directory
//! into an immutable [`MessageCatalog`]. Translation then picks a
//! [`Printer`] for the caller's current locale, falling back to the
//! configured fallback locale, and formats the message with Go-style
//! `%` verbs including explicit argument indexes (`%[2]d`).
//!
//! ```no_run
//! use lingua_i18n::{tr_args, I18n, Translate};
//!
//! fn greet() -> Result<(), lingua_i18n::I18nError> {
//!     let mut i18n = I18n::new()
//!         .with_locales_dir("locales")
//!         .with_default_locale("en_US");
//!     i18n.locales_init()?;
//!
//!     i18n.change_locale("zh_Hans");
//!     println!("{}", i18n.trf("Score", &tr_args!["Zhang", 88]));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod context;
pub mod error;
pub mod format;
pub mod locale;
pub mod manager;
pub mod pluralization;
pub mod resource;

pub use bundle::{CatalogBuilder, MessageCatalog, MessageTable, PluralTemplate, Printer, Template};
pub use context::LocaleScope;
pub use error::{I18nError, I18nResult, PluralCaseError};
pub use locale::LocaleTag;
pub use manager::{I18n, I18nOptions, Translate, Translator};
pub use pluralization::{PluralCategory, PluralRule};
pub use resource::{LocaleFile, PayloadFormat, ResourceManager};

pub use fluent::FluentValue;

/// Build a `Vec<FluentValue>` of translation arguments.
///
/// ```
/// use lingua_i18n::{tr_args, FluentValue};
///
/// let args: Vec<FluentValue> = tr_args!["Zhang", 88, 1.5];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! tr_args {
    () => {
        ::std::vec::Vec::<$crate::FluentValue>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::FluentValue::from($arg)),+]
    };
}
