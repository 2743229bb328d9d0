//! Locale tag resolution
//!
//! Every locale name that reaches the catalog goes through [`LocaleTag`], so
//! `zh_Hans`, `zh-hans` and `ZH-Hans` all land on the same canonical key.

use crate::error::{I18nError, I18nResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use unic_langid::subtags::{Language, Region, Script, Variant};
use unic_langid::LanguageIdentifier;

static ENGLISH: Lazy<LocaleTag> = Lazy::new(|| {
    LocaleTag::from_language_identifier("en".parse().unwrap_or_default())
});

/// Canonical language/script/region identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LocaleTag {
    canonical: String,
    id: LanguageIdentifier,
}

impl LocaleTag {
    /// The hard-coded default tag used when a name cannot be resolved at all
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    /// Strictly parse a locale name, accepting `-` or `_` separators
    pub fn parse(name: &str) -> I18nResult<Self> {
        let trimmed = name.trim();
        let id = LanguageIdentifier::from_str(trimmed)
            .map_err(|_| I18nError::InvalidLanguageId(name.to_string()))?;
        let tag = Self::from_language_identifier(id);
        if tag.is_undetermined() {
            return Err(I18nError::InvalidLanguageId(name.to_string()));
        }
        Ok(tag)
    }

    /// Resolve a locale name, falling back to English when nothing usable remains
    pub fn resolve(name: &str) -> Self {
        Self::try_resolve(name).unwrap_or_else(Self::english)
    }

    /// Resolve a locale name, falling back to `default` instead of English
    pub fn resolve_or(name: &str, default: &Self) -> Self {
        Self::try_resolve(name).unwrap_or_else(|| default.clone())
    }

    /// Strict parse first, then a best-effort build from the leading subtags
    pub fn try_resolve(name: &str) -> Option<Self> {
        if let Ok(tag) = Self::parse(name) {
            return Some(tag);
        }
        let tag = Self::best_effort(name)?;
        debug!("Resolved malformed locale name {:?} to {}", name, tag);
        Some(tag)
    }

    /// Build a tag from the subtags that parse, stopping at the first one that does not.
    /// POSIX suffixes such as `.UTF-8` or `@euro` are ignored.
    fn best_effort(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.split(['.', '@']).next().unwrap_or_default();
        let mut parts = name.split(['-', '_']).filter(|part| !part.is_empty());

        let language = Language::from_str(parts.next()?).ok()?;
        let mut script: Option<Script> = None;
        let mut region: Option<Region> = None;
        let mut variants: Vec<Variant> = Vec::new();

        for part in parts {
            if script.is_none() && region.is_none() && variants.is_empty() {
                if let Ok(parsed) = Script::from_str(part) {
                    script = Some(parsed);
                    continue;
                }
            }
            if region.is_none() && variants.is_empty() {
                if let Ok(parsed) = Region::from_str(part) {
                    region = Some(parsed);
                    continue;
                }
            }
            match Variant::from_str(part) {
                Ok(parsed) => variants.push(parsed),
                Err(_) => break,
            }
        }

        let tag = Self::from_language_identifier(LanguageIdentifier::from_parts(
            language, script, region, &variants,
        ));
        (!tag.is_undetermined()).then_some(tag)
    }

    /// Wrap an already parsed identifier
    pub fn from_language_identifier(id: LanguageIdentifier) -> Self {
        Self {
            canonical: id.to_string(),
            id,
        }
    }

    /// Canonical string form, used as the catalog key
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The underlying language identifier
    pub fn language_identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// Primary language subtag, e.g. `zh` for `zh-Hans-CN`
    pub fn language(&self) -> &str {
        self.canonical
            .split('-')
            .next()
            .unwrap_or(self.canonical.as_str())
    }

    /// Script subtag, if any
    pub fn script(&self) -> Option<String> {
        self.id.script.as_ref().map(ToString::to_string)
    }

    /// Region subtag, if any
    pub fn region(&self) -> Option<String> {
        self.id.region.as_ref().map(ToString::to_string)
    }

    /// Whether the tag carries no real language (`und`)
    pub fn is_undetermined(&self) -> bool {
        self.language() == "und"
    }

    /// Progressively truncated tags, most specific first, excluding `self`.
    ///
    /// `zh-Hans-CN` yields `zh-Hans`, then `zh`.
    pub fn parents(&self) -> Vec<Self> {
        let mut parents = Vec::new();
        let mut current = self.canonical.as_str();
        while let Some((head, _)) = current.rsplit_once('-') {
            if let Ok(tag) = Self::parse(head) {
                parents.push(tag);
            }
            current = head;
        }
        parents
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl From<String> for LocaleTag {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

impl From<&str> for LocaleTag {
    fn from(name: &str) -> Self {
        Self::resolve(name)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.canonical
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}
