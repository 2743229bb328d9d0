//! Catalog compilation and per-locale printers
//!
//! Loading goes through [`CatalogBuilder`], the only mutable stage. Once
//! [`CatalogBuilder::build`] runs, the resulting [`MessageCatalog`] and every
//! [`Printer`] in it are immutable and shared through `Arc`.

use crate::error::{I18nError, I18nResult, PluralCaseError};
use crate::format;
use crate::pluralization::{PluralCategory, PluralRule};
use crate::LocaleTag;
use fluent::FluentValue;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

/// A translation value: a format string, or plural cases of format strings
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// Plain format string
    Text(String),
    /// Format strings selected by a numeric argument
    Plural(PluralTemplate),
}

impl Template {
    /// Render the template for a message of `locale`
    pub fn render(&self, key: &str, locale: &LocaleTag, args: &[FluentValue<'_>]) -> String {
        match self {
            Self::Text(text) => format::sprintf(text, args),
            Self::Plural(plural) => {
                let rule = PluralRule::for_locale(locale);
                let text = plural.select(rule, args).unwrap_or(key);
                format::sprintf(text, args)
            }
        }
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Plural cases keyed by exact value or CLDR category
#[derive(Debug, Clone, PartialEq)]
pub struct PluralTemplate {
    /// 1-based index of the selecting argument
    arg: usize,
    exact: Vec<(f64, String)>,
    cases: BTreeMap<PluralCategory, String>,
}

impl PluralTemplate {
    /// Create an empty plural template selected by argument `arg` (1-based)
    pub fn new(arg: usize) -> Self {
        Self {
            arg: arg.max(1),
            exact: Vec::new(),
            cases: BTreeMap::new(),
        }
    }

    /// Build from raw case keys: category keywords (`one`, `other`, ...) or exact values (`=0`)
    pub fn from_cases<I, K, V>(arg: usize, cases: I) -> Result<Self, PluralCaseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut template = Self::new(arg);
        for (key, text) in cases {
            let key = key.as_ref();
            if let Some(value) = key.strip_prefix('=') {
                let value: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| PluralCaseError::InvalidExactValue {
                        case: key.to_string(),
                    })?;
                template.exact.push((value, text.into()));
            } else {
                let category: PluralCategory = key.parse()?;
                template.cases.insert(category, text.into());
            }
        }
        if template.exact.is_empty() && template.cases.is_empty() {
            return Err(PluralCaseError::NoCases);
        }
        Ok(template)
    }

    /// Add a category case
    pub fn with_case(mut self, category: PluralCategory, text: impl Into<String>) -> Self {
        self.cases.insert(category, text.into());
        self
    }

    /// Add an exact-value case
    pub fn with_exact(mut self, value: f64, text: impl Into<String>) -> Self {
        self.exact.push((value, text.into()));
        self
    }

    /// 1-based index of the selecting argument
    pub fn arg(&self) -> usize {
        self.arg
    }

    /// Categories this template defines
    pub fn categories(&self) -> impl Iterator<Item = PluralCategory> + '_ {
        self.cases.keys().copied()
    }

    /// Pick the case for `args`: exact value, then category, then `other`
    pub fn select(&self, rule: PluralRule, args: &[FluentValue<'_>]) -> Option<&str> {
        let count = match args.get(self.arg - 1) {
            Some(FluentValue::Number(n)) => Some(n.value),
            Some(FluentValue::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        if let Some(count) = count {
            if let Some((_, text)) = self.exact.iter().find(|(value, _)| *value == count) {
                return Some(text);
            }
            if let Some(text) = self.cases.get(&rule.category(count)) {
                return Some(text);
            }
        }
        self.cases.get(&PluralCategory::Other).map(String::as_str)
    }
}

/// All translations registered for one locale
#[derive(Debug, Clone)]
pub struct MessageTable {
    locale: LocaleTag,
    messages: HashMap<String, Template>,
}

impl MessageTable {
    fn new(locale: LocaleTag) -> Self {
        Self {
            locale,
            messages: HashMap::new(),
        }
    }

    /// Locale of this table
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// Template for a key
    pub fn get(&self, key: &str) -> Option<&Template> {
        self.messages.get(key)
    }

    /// Whether the key is defined here
    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Sorted keys
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the table has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Locale-bound formatter.
///
/// Looks a key up in its own table, then in the tables of its parent
/// locales, then in the fallback locale's tables. A key found nowhere is
/// used as the template itself.
#[derive(Debug, Clone)]
pub struct Printer {
    locale: LocaleTag,
    chain: Vec<Arc<MessageTable>>,
}

impl Printer {
    fn new(locale: LocaleTag, chain: Vec<Arc<MessageTable>>) -> Self {
        Self { locale, chain }
    }

    /// A printer with no tables: every key renders as its own template
    pub fn literal(locale: LocaleTag) -> Self {
        Self::new(locale, Vec::new())
    }

    /// Locale this printer was compiled for
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// The printer's own table, if its locale has one
    pub fn table(&self) -> Option<&MessageTable> {
        self.chain
            .first()
            .filter(|table| table.locale == self.locale)
            .map(|table| &**table)
    }

    /// Locales consulted on lookup, in order
    pub fn lookup_chain(&self) -> Vec<&LocaleTag> {
        self.chain.iter().map(|table| &table.locale).collect()
    }

    fn find(&self, key: &str) -> Option<(&LocaleTag, &Template)> {
        self.chain
            .iter()
            .find_map(|table| table.get(key).map(|template| (&table.locale, template)))
    }

    /// Template for a key, searching the whole lookup chain
    pub fn template(&self, key: &str) -> Option<&Template> {
        self.find(key).map(|(_, template)| template)
    }

    /// Whether a key resolves anywhere in the chain
    pub fn has_message(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Locale whose table answers for `key`
    pub fn resolved_from(&self, key: &str) -> Option<&LocaleTag> {
        self.find(key).map(|(locale, _)| locale)
    }

    /// Translate and format `key`.
    ///
    /// An untranslated key is formatted itself, except that without
    /// arguments it is returned verbatim, so `"100% done"` stays intact.
    pub fn sprintf(&self, key: &str, args: &[FluentValue<'_>]) -> String {
        match self.find(key) {
            Some((locale, template)) => template.render(key, locale, args),
            None if args.is_empty() => key.to_string(),
            None => format::sprintf(key, args),
        }
    }

    /// Translate `key` without arguments
    pub fn sprint(&self, key: &str) -> String {
        self.sprintf(key, &[])
    }

    /// Translate `key` without arguments, followed by a newline
    pub fn sprintln(&self, key: &str) -> String {
        let mut line = self.sprint(key);
        line.push('\n');
        line
    }

    /// Translate and format `key` into `writer`, returning bytes written
    pub fn fprintf<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        key: &str,
        args: &[FluentValue<'_>],
    ) -> io::Result<usize> {
        write_all(writer, &self.sprintf(key, args))
    }

    /// Translate `key` into `writer`
    pub fn fprint<W: Write + ?Sized>(&self, writer: &mut W, key: &str) -> io::Result<usize> {
        write_all(writer, &self.sprint(key))
    }

    /// Translate `key` into `writer`, followed by a newline
    pub fn fprintln<W: Write + ?Sized>(&self, writer: &mut W, key: &str) -> io::Result<usize> {
        write_all(writer, &self.sprintln(key))
    }

    /// Translate and format `key` to stdout
    pub fn printf(&self, key: &str, args: &[FluentValue<'_>]) -> io::Result<usize> {
        self.fprintf(&mut io::stdout().lock(), key, args)
    }

    /// Translate `key` to stdout
    pub fn print(&self, key: &str) -> io::Result<usize> {
        self.fprint(&mut io::stdout().lock(), key)
    }

    /// Translate `key` to stdout, followed by a newline
    pub fn println(&self, key: &str) -> io::Result<usize> {
        self.fprintln(&mut io::stdout().lock(), key)
    }
}

fn write_all<W: Write + ?Sized>(writer: &mut W, text: &str) -> io::Result<usize> {
    writer.write_all(text.as_bytes())?;
    Ok(text.len())
}

/// Mutable accumulation stage for a catalog
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tables: HashMap<String, MessageTable>,
}

impl CatalogBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing and returning any previous one for the same key
    pub fn set_template(
        &mut self,
        locale: &LocaleTag,
        key: impl Into<String>,
        template: Template,
    ) -> Option<Template> {
        let key = key.into();
        let table = self
            .tables
            .entry(locale.as_str().to_string())
            .or_insert_with(|| MessageTable::new(locale.clone()));
        let previous = table.messages.insert(key, template);
        if previous.is_some() {
            debug!("Overwrote existing translation in locale {}", locale);
        }
        previous
    }

    /// Register a plain format string
    pub fn set_string(
        &mut self,
        locale: &LocaleTag,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<Template> {
        self.set_template(locale, key, Template::Text(text.into()))
    }

    /// Locales registered so far
    pub fn locales(&self) -> impl Iterator<Item = &LocaleTag> {
        self.tables.values().map(MessageTable::locale)
    }

    /// Number of locales registered so far
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of registered messages across locales
    pub fn message_count(&self) -> usize {
        self.tables.values().map(MessageTable::len).sum()
    }

    /// Compile one printer per registered locale
    pub fn build(self, fallback: &LocaleTag) -> MessageCatalog {
        let tables: HashMap<String, Arc<MessageTable>> = self
            .tables
            .into_iter()
            .map(|(key, table)| (key, Arc::new(table)))
            .collect();

        let printers = tables
            .iter()
            .map(|(key, table)| {
                let chain = lookup_chain(&tables, &table.locale, fallback);
                (key.clone(), Arc::new(Printer::new(table.locale.clone(), chain)))
            })
            .collect();

        MessageCatalog {
            printers,
            fallback: fallback.clone(),
        }
    }
}

/// `locale`, its parents, then the fallback and its parents, skipping repeats
/// and locales without a table
fn lookup_chain(
    tables: &HashMap<String, Arc<MessageTable>>,
    locale: &LocaleTag,
    fallback: &LocaleTag,
) -> Vec<Arc<MessageTable>> {
    let candidates = std::iter::once(locale.clone())
        .chain(locale.parents())
        .chain(std::iter::once(fallback.clone()))
        .chain(fallback.parents());

    let mut chain: Vec<Arc<MessageTable>> = Vec::new();
    for candidate in candidates {
        let Some(table) = tables.get(candidate.as_str()) else {
            continue;
        };
        if !chain.iter().any(|seen| seen.locale == candidate) {
            chain.push(Arc::clone(table));
        }
    }
    chain
}

/// Immutable set of compiled printers keyed by canonical locale
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    printers: HashMap<String, Arc<Printer>>,
    fallback: LocaleTag,
}

impl MessageCatalog {
    /// A catalog with no locales
    pub fn empty(fallback: LocaleTag) -> Self {
        Self {
            printers: HashMap::new(),
            fallback,
        }
    }

    /// Printer compiled for exactly `locale`
    pub fn printer(&self, locale: &LocaleTag) -> Option<Arc<Printer>> {
        self.printers.get(locale.as_str()).cloned()
    }

    /// Printer for `locale`, its nearest parent, or the fallback locale
    pub fn lookup(&self, locale: &LocaleTag) -> I18nResult<Arc<Printer>> {
        let candidates = std::iter::once(locale.clone())
            .chain(locale.parents())
            .chain(std::iter::once(self.fallback.clone()))
            .chain(self.fallback.parents());

        for candidate in candidates {
            if let Some(printer) = self.printer(&candidate) {
                if &candidate != locale {
                    debug!("No catalog for {}, using {}", locale, candidate);
                }
                return Ok(printer);
            }
        }
        Err(I18nError::locale_not_found(locale.as_str()))
    }

    /// Like [`lookup`](Self::lookup), but never fails: with nothing compiled,
    /// keys render as their own templates
    pub fn printer_or_literal(&self, locale: &LocaleTag) -> Arc<Printer> {
        self.lookup(locale)
            .unwrap_or_else(|_| Arc::new(Printer::literal(locale.clone())))
    }

    /// Whether `locale` has its own compiled printer
    pub fn contains_locale(&self, locale: &LocaleTag) -> bool {
        self.printers.contains_key(locale.as_str())
    }

    /// Compiled locales, sorted by canonical form
    pub fn locales(&self) -> Vec<&LocaleTag> {
        let mut locales: Vec<&LocaleTag> = self.printers.values().map(|p| p.locale()).collect();
        locales.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        locales
    }

    /// Fallback locale consulted for missing locales and keys
    pub fn fallback_locale(&self) -> &LocaleTag {
        &self.fallback
    }

    /// Keys defined by `locale` itself, sorted
    pub fn keys(&self, locale: &LocaleTag) -> Vec<&str> {
        self.printers
            .get(locale.as_str())
            .and_then(|printer| printer.table())
            .map(MessageTable::keys)
            .unwrap_or_default()
    }

    /// Keys `reference` defines that `locale` does not define itself
    pub fn missing_keys(&self, locale: &LocaleTag, reference: &LocaleTag) -> Vec<String> {
        let own = self
            .printers
            .get(locale.as_str())
            .and_then(|printer| printer.table());
        self.keys(reference)
            .into_iter()
            .filter(|key| !own.is_some_and(|table| table.contains(key)))
            .map(str::to_string)
            .collect()
    }

    /// Number of compiled locales
    pub fn len(&self) -> usize {
        self.printers.len()
    }

    /// Whether no locale was compiled
    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}
