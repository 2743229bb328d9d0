//! Translator facade
//!
//! [`I18n`] owns the construction options and the compiled catalog.
//! [`Translator`] is a cheap handle sharing that catalog with its own
//! [`LocaleScope`], so independent call chains can translate concurrently.

use crate::bundle::{CatalogBuilder, MessageCatalog, Printer};
use crate::context::LocaleScope;
use crate::error::{I18nError, I18nResult};
use crate::resource::ResourceManager;
use crate::LocaleTag;
use fluent::FluentValue;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Construction options for [`I18n`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nOptions {
    /// Locale used when the current scope has no locale set
    pub default_locale: Option<String>,
    /// Directory holding the locale data files
    pub locales_dir: PathBuf,
    /// Locale consulted for missing locales and keys; the default locale when unset
    pub fallback_locale: Option<String>,
}

impl Default for I18nOptions {
    fn default() -> Self {
        Self {
            default_locale: None,
            locales_dir: PathBuf::from("locales"),
            fallback_locale: None,
        }
    }
}

/// Translation operations shared by [`I18n`] and [`Translator`].
///
/// Every operation resolves the current locale, picks a printer through
/// the catalog (silently falling back) and formats the key. Missing keys
/// and locales never fail; only the writer variants return errors, and
/// those come unmodified from the sink.
pub trait Translate {
    /// Printer for the current locale
    fn current_printer(&self) -> Arc<Printer>;

    /// Translate `key`
    fn tr(&self, key: &str) -> String {
        self.current_printer().sprint(key)
    }

    /// Translate `key` and format it with `args`
    fn trf(&self, key: &str, args: &[FluentValue<'_>]) -> String {
        self.current_printer().sprintf(key, args)
    }

    /// Translate and format `key` into `writer`, returning bytes written
    fn trf_writer<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        key: &str,
        args: &[FluentValue<'_>],
    ) -> io::Result<usize> {
        self.current_printer().fprintf(writer, key, args)
    }

    /// Translate `key` to stdout
    fn tr_print(&self, key: &str) -> io::Result<usize> {
        self.current_printer().print(key)
    }

    /// Translate `key` into `writer`
    fn trf_print<W: Write + ?Sized>(&self, writer: &mut W, key: &str) -> io::Result<usize> {
        self.current_printer().fprint(writer, key)
    }

    /// Translate `key` to stdout, followed by a newline
    fn tr_println(&self, key: &str) -> io::Result<usize> {
        self.current_printer().println(key)
    }

    /// Translate `key` into `writer`, followed by a newline
    fn trf_println<W: Write + ?Sized>(&self, writer: &mut W, key: &str) -> io::Result<usize> {
        self.current_printer().fprintln(writer, key)
    }
}

/// The locale to translate into: the scope's locale if set and non-empty,
/// the default otherwise
fn current_locale_of(scope: &LocaleScope, default_locale: &LocaleTag) -> LocaleTag {
    match scope.current() {
        Some(name) if !name.trim().is_empty() => LocaleTag::resolve(name),
        _ => default_locale.clone(),
    }
}

fn printer_in(catalog: Option<&MessageCatalog>, locale: &LocaleTag) -> Arc<Printer> {
    match catalog {
        Some(catalog) => catalog.printer_or_literal(locale),
        None => Arc::new(Printer::literal(locale.clone())),
    }
}

/// Localization instance: options, compiled catalog and root scope
#[derive(Debug, Clone)]
pub struct I18n {
    default_locale: LocaleTag,
    fallback_locale: Option<LocaleTag>,
    locales_dir: PathBuf,
    scope: LocaleScope,
    catalog: Option<Arc<MessageCatalog>>,
}

impl I18n {
    /// Create an instance with default options
    pub fn new() -> Self {
        Self::with_options(&I18nOptions::default())
    }

    /// Create an instance from construction options
    pub fn with_options(options: &I18nOptions) -> Self {
        let mut i18n = Self {
            default_locale: LocaleTag::english(),
            fallback_locale: None,
            locales_dir: options.locales_dir.clone(),
            scope: LocaleScope::new(),
            catalog: None,
        };
        if let Some(name) = &options.default_locale {
            i18n = i18n.with_default_locale(name);
        }
        if let Some(name) = &options.fallback_locale {
            i18n = i18n.with_fallback_locale(name);
        }
        i18n
    }

    /// Set the default locale and make it current for the root scope
    pub fn with_default_locale(mut self, name: &str) -> Self {
        self.default_locale = LocaleTag::resolve(name);
        self.scope.set_current(name);
        self
    }

    /// Set the directory holding locale data files
    pub fn with_locales_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.locales_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the locale consulted for missing locales and keys
    pub fn with_fallback_locale(mut self, name: &str) -> Self {
        self.fallback_locale = Some(LocaleTag::resolve(name));
        self
    }

    /// Load every locale data file and compile the catalog.
    ///
    /// On failure the instance is left not ready, even if an earlier call
    /// had succeeded. Calling it again reloads from scratch.
    pub fn locales_init(&mut self) -> I18nResult<()> {
        self.catalog = None;

        let fallback = self.fallback_locale().clone();
        let mut builder = CatalogBuilder::new();
        let files = ResourceManager::new(&self.locales_dir).load_into(&mut builder)?;

        let catalog = builder.build(&fallback);
        if catalog.lookup(&fallback).is_err() {
            warn!(
                "Fallback locale {} has no translations in {:?}",
                fallback, self.locales_dir
            );
        }

        info!(
            "Initialized {} locales from {} files (default {}, fallback {})",
            catalog.len(),
            files,
            self.default_locale,
            fallback
        );
        self.catalog = Some(Arc::new(catalog));
        Ok(())
    }

    /// Whether [`locales_init`](Self::locales_init) has succeeded
    pub fn is_ready(&self) -> bool {
        self.catalog.is_some()
    }

    /// Switch the root scope to `name` for subsequent calls
    pub fn change_locale(&mut self, name: &str) {
        debug!("Changing locale to {}", name);
        self.scope.set_current(name);
    }

    /// Locale the next call would translate into
    pub fn current_locale(&self) -> LocaleTag {
        current_locale_of(&self.scope, &self.default_locale)
    }

    /// Locale used when no locale is set
    pub fn default_locale(&self) -> &LocaleTag {
        &self.default_locale
    }

    /// Locale consulted for missing locales and keys
    pub fn fallback_locale(&self) -> &LocaleTag {
        self.fallback_locale.as_ref().unwrap_or(&self.default_locale)
    }

    /// Directory holding locale data files
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }

    /// Root scope
    pub fn scope(&self) -> &LocaleScope {
        &self.scope
    }

    /// Compiled catalog, once ready
    pub fn catalog(&self) -> Option<&Arc<MessageCatalog>> {
        self.catalog.as_ref()
    }

    /// A handle sharing the compiled catalog, starting from a snapshot of the root scope
    pub fn translator(&self) -> Translator {
        let catalog = self
            .catalog
            .clone()
            .unwrap_or_else(|| Arc::new(MessageCatalog::empty(self.fallback_locale().clone())));
        Translator {
            catalog,
            default_locale: self.default_locale.clone(),
            scope: self.scope.derive(),
        }
    }

    /// Printer compiled for exactly `name`.
    ///
    /// Fails with [`I18nError::LocaleNotFound`] when `name` is not a real
    /// language tag, when no catalog is ready, or when the locale had no
    /// data file.
    pub fn printer_for_locale(&self, name: &str) -> I18nResult<Arc<Printer>> {
        let locale =
            LocaleTag::try_resolve(name).ok_or_else(|| I18nError::locale_not_found(name))?;
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.printer(&locale))
            .ok_or_else(|| I18nError::locale_not_found(locale.as_str()))
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl Translate for I18n {
    fn current_printer(&self) -> Arc<Printer> {
        printer_in(self.catalog.as_deref(), &self.current_locale())
    }
}

/// Scope-bound handle on a compiled catalog.
///
/// Cloning is cheap; each clone carries its own scope.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<MessageCatalog>,
    default_locale: LocaleTag,
    scope: LocaleScope,
}

impl Translator {
    /// Switch this handle to `name` for subsequent calls
    pub fn change_locale(&mut self, name: &str) {
        self.scope.set_current(name);
    }

    /// Locale the next call would translate into
    pub fn current_locale(&self) -> LocaleTag {
        current_locale_of(&self.scope, &self.default_locale)
    }

    /// This handle's scope
    pub fn scope(&self) -> &LocaleScope {
        &self.scope
    }

    /// The same catalog bound to another scope
    pub fn with_scope(&self, scope: LocaleScope) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            default_locale: self.default_locale.clone(),
            scope,
        }
    }

    /// A handle for a nested call chain, starting from this handle's locale
    pub fn derive(&self) -> Self {
        self.with_scope(self.scope.derive())
    }

    /// Compiled catalog
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }
}

impl Translate for Translator {
    fn current_printer(&self) -> Arc<Printer> {
        printer_in(Some(&self.catalog), &self.current_locale())
    }
}
