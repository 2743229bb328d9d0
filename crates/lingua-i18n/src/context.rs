//! Call-scoped current locale
//!
//! The current locale is plain caller-owned state. Concurrent call chains
//! each carry their own [`LocaleScope`] and never observe each other's
//! changes.

use serde::{Deserialize, Serialize};

/// The locale chosen for one logical call chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleScope {
    current: Option<String>,
}

impl LocaleScope {
    /// Create a scope with no locale set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope with `name` as its current locale
    pub fn with_locale(name: impl Into<String>) -> Self {
        Self {
            current: Some(name.into()),
        }
    }

    /// Change the current locale for calls made through this scope from now on
    pub fn set_current(&mut self, name: impl Into<String>) {
        self.current = Some(name.into());
    }

    /// The locale name as set, unresolved
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Forget the current locale, so callers use their default again
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Snapshot for a nested call chain; later changes on either side are not shared
    pub fn derive(&self) -> Self {
        self.clone()
    }
}
