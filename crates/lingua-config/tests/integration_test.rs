//! Integration tests for lingua-config.

use lingua_common::test_utils::{create_temp_dir, init_test_logging, LocaleFixture};
use lingua_config::{ConfigError, ConfigLoader};
use lingua_i18n::Translate;
use std::fs;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_load_falls_back_to_defaults() {
    init_test_logging();
    let dir = create_temp_dir();

    let config = ConfigLoader::load_with(dir.path(), no_env).unwrap();
    assert_eq!(config, lingua_config::Config::default());
}

#[test]
fn test_load_prefers_yaml_over_toml() {
    init_test_logging();
    let dir = create_temp_dir();
    fs::write(dir.path().join("lingua.toml"), "[i18n]\ndefault_locale = \"de\"\n").unwrap();
    fs::write(dir.path().join("lingua.yaml"), "i18n:\n  default_locale: fr\n").unwrap();

    let config = ConfigLoader::load_with(dir.path(), no_env).unwrap();
    assert_eq!(config.i18n.default_locale.as_deref(), Some("fr"));
}

#[test]
fn test_config_path_variable_wins() {
    init_test_logging();
    let dir = create_temp_dir();
    fs::write(dir.path().join("lingua.yaml"), "i18n:\n  default_locale: fr\n").unwrap();
    let explicit = dir.path().join("custom.toml");
    fs::write(&explicit, "[i18n]\ndefault_locale = \"ja\"\n").unwrap();

    let path = explicit.to_string_lossy().into_owned();
    let config = ConfigLoader::load_with(dir.path(), |var| {
        (var == "LINGUA_CONFIG_PATH").then(|| path.clone())
    })
    .unwrap();
    assert_eq!(config.i18n.default_locale.as_deref(), Some("ja"));
}

#[test]
fn test_invalid_file_is_reported() {
    init_test_logging();
    let dir = create_temp_dir();
    fs::write(dir.path().join("lingua.yml"), "logging:\n  level: \"lingua=loud\"\n").unwrap();

    let result = ConfigLoader::load_with(dir.path(), no_env);
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn test_config_drives_translation() {
    init_test_logging();
    let locales = LocaleFixture::new()
        .with_file("en_US.json", r#"{"Hello": "Hello, %s!"}"#)
        .with_file("zh_Hans.json", r#"{"Hello": "你好，%s！"}"#);
    let dir = create_temp_dir();
    fs::write(
        dir.path().join("lingua.yaml"),
        format!(
            "i18n:\n  default_locale: zh_Hans\n  fallback_locale: en_US\n  locales_dir: {:?}\n",
            locales.path()
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_with(dir.path(), no_env).unwrap();
    let mut i18n = config.build_i18n();
    i18n.locales_init().unwrap();

    assert_eq!(
        i18n.trf("Hello", &lingua_i18n::tr_args!["Li"]),
        "你好，Li！"
    );
    i18n.change_locale("es");
    assert_eq!(
        i18n.trf("Hello", &lingua_i18n::tr_args!["Li"]),
        "Hello, Li!"
    );
}
