//! Validation rules for configuration values

use crate::loader::ConfigError;
use crate::Config;
use lingua_i18n::LocaleTag;
use std::path::Path;

/// Validate a locale name: it must resolve to a real tag
pub fn validate_locale_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::validation(field, "locale name is empty"));
    }
    match LocaleTag::try_resolve(name) {
        Some(_) => Ok(()),
        None => Err(ConfigError::validation(
            field,
            format!("{name:?} is not a language tag"),
        )),
    }
}

/// Validate the locales directory setting
pub fn validate_locales_dir(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::validation("i18n.locales_dir", "path is empty"));
    }
    Ok(())
}

/// Validate a log filter directive
pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    if level.trim().is_empty() {
        return Err(ConfigError::validation("logging.level", "level is empty"));
    }
    lingua_common::logging::parse_filter(level)
        .map(|_| ())
        .map_err(|err| ConfigError::validation("logging.level", err.to_string()))
}

impl Config {
    /// Validate every field, reporting the first problem
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.i18n.default_locale {
            validate_locale_name("i18n.default_locale", name)?;
        }
        if let Some(name) = &self.i18n.fallback_locale {
            validate_locale_name("i18n.fallback_locale", name)?;
        }
        validate_locales_dir(&self.i18n.locales_dir)?;
        validate_log_level(&self.logging.level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_locale_name() {
        assert!(validate_locale_name("f", "en_US").is_ok());
        assert!(validate_locale_name("f", "zh-Hans").is_ok());
        assert!(validate_locale_name("f", "de_DE.UTF-8").is_ok());

        assert!(validate_locale_name("f", "").is_err());
        assert!(validate_locale_name("f", "nonexistent-locale").is_err());
        assert!(validate_locale_name("f", "123").is_err());
    }

    #[test]
    fn test_validate_locales_dir() {
        assert!(validate_locales_dir(Path::new("locales")).is_ok());
        assert!(validate_locales_dir(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("lingua_i18n=debug,warn").is_ok());
        assert!(validate_log_level("").is_err());
        assert!(validate_log_level("lingua_i18n=loud").is_err());
    }

    #[test]
    fn test_validate_all_reports_field() {
        let mut config = Config::default();
        assert!(config.validate_all().is_ok());

        config.i18n.fallback_locale = Some("???".to_string());
        let err = config.validate_all().unwrap_err();
        assert!(err.to_string().contains("i18n.fallback_locale"));

        config.i18n.fallback_locale = None;
        config.i18n.locales_dir = PathBuf::new();
        assert!(matches!(
            config.validate_all(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
