//! Integration tests for lingua-i18n.
//!
//! These tests load real locale directories and drive the facade the way
//! an application would.

use lingua_common::test_utils::{init_test_logging, LocaleFixture};
use lingua_i18n::{tr_args, I18n, I18nError, LocaleScope, LocaleTag, Translate};
use std::io::{self, ErrorKind, Write};
use std::thread;

fn scenario_fixture() -> LocaleFixture {
    LocaleFixture::new()
        .with_file("en_US.json", r#"{"Score": "%[1]s scored %[2]d points"}"#)
        .with_file("zh_Hans.json", r#"{"Score": "%[1]s 得了 %[2]d 分"}"#)
}

fn ready(fixture: &LocaleFixture) -> I18n {
    let mut i18n = I18n::new()
        .with_locales_dir(fixture.path())
        .with_default_locale("en_US")
        .with_fallback_locale("en_US");
    i18n.locales_init().unwrap();
    i18n
}

#[test]
fn test_score_scenario() {
    init_test_logging();
    let fixture = scenario_fixture();
    let mut i18n = ready(&fixture);

    i18n.change_locale("zh_Hans");
    assert_eq!(i18n.trf("Score", &tr_args!["Zhang", 88]), "Zhang 得了 88 分");

    i18n.change_locale("fr_FR");
    assert_eq!(
        i18n.trf("Score", &tr_args!["Zhang", 88]),
        "Zhang scored 88 points"
    );
}

#[test]
fn test_missing_key_is_returned_unmodified() {
    init_test_logging();
    let fixture = scenario_fixture();
    let mut i18n = ready(&fixture);

    assert_eq!(i18n.tr("Nobody translated this"), "Nobody translated this");
    i18n.change_locale("zh_Hans");
    assert_eq!(i18n.tr("Nobody translated this"), "Nobody translated this");
    assert_eq!(i18n.tr("100% done"), "100% done");

    let mut out = Vec::new();
    i18n.trf_println(&mut out, "100% done").unwrap();
    assert_eq!(out, b"100% done\n");
}

/// Sink that refuses every write
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_variants_return_sink_errors_unmodified() {
    init_test_logging();
    let fixture = scenario_fixture();
    let i18n = ready(&fixture);

    let results = [
        i18n.trf_writer(&mut BrokenSink, "Score", &tr_args!["Zhang", 88]),
        i18n.trf_print(&mut BrokenSink, "Score"),
        i18n.trf_println(&mut BrokenSink, "Untranslated"),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
        assert_eq!(err.to_string(), "sink closed");
    }

    let translator = i18n.translator().with_scope(LocaleScope::with_locale("zh_Hans"));
    let err = translator
        .trf_writer(&mut BrokenSink, "Score", &tr_args!["Li", 1])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BrokenPipe);
}

#[test]
fn test_printer_for_every_locale_file() {
    init_test_logging();
    let fixture = scenario_fixture();
    let i18n = ready(&fixture);

    let en = i18n.printer_for_locale("en_US").unwrap();
    assert_eq!(
        en.sprintf("Score", &tr_args!["Ann", 3]),
        "Ann scored 3 points"
    );
    let zh = i18n.printer_for_locale("zh-Hans").unwrap();
    assert_eq!(zh.sprintf("Score", &tr_args!["Ann", 3]), "Ann 得了 3 分");

    assert!(matches!(
        i18n.printer_for_locale("nonexistent-locale"),
        Err(I18nError::LocaleNotFound { .. })
    ));
    assert!(matches!(
        i18n.printer_for_locale("fr_FR"),
        Err(I18nError::LocaleNotFound { .. })
    ));
}

#[test]
fn test_malformed_payload_leaves_instance_not_ready() {
    init_test_logging();
    let fixture = scenario_fixture().with_file("de.json", r#"{"Score": "#);
    let mut i18n = I18n::new().with_locales_dir(fixture.path());

    let err = i18n.locales_init().unwrap_err();
    assert!(matches!(err, I18nError::PayloadParseError { .. }));
    assert!(err.is_load_error());
    assert!(!i18n.is_ready());
    assert_eq!(i18n.tr("Score"), "Score");
}

#[test]
fn test_directory_errors() {
    init_test_logging();
    let mut i18n = I18n::new().with_locales_dir("");
    assert!(matches!(
        i18n.locales_init(),
        Err(I18nError::DirectoryNotConfigured)
    ));

    let fixture = LocaleFixture::new();
    let mut i18n = I18n::new().with_locales_dir(fixture.path().join("missing"));
    assert!(matches!(
        i18n.locales_init(),
        Err(I18nError::DirectoryNotFound { .. })
    ));
}

#[test]
fn test_init_twice_picks_up_new_files() {
    init_test_logging();
    let fixture = scenario_fixture();
    let mut i18n = ready(&fixture);
    assert!(i18n.printer_for_locale("de").is_err());

    fixture.write("de.json", r#"{"Score": "%[1]s hat %[2]d Punkte"}"#);
    i18n.locales_init().unwrap();
    i18n.locales_init().unwrap();

    i18n.change_locale("de_DE");
    assert_eq!(
        i18n.trf("Score", &tr_args!["Zhang", 88]),
        "Zhang hat 88 Punkte"
    );
    assert_eq!(i18n.catalog().map(|c| c.len()), Some(3));
}

#[test]
fn test_change_locale_only_affects_later_calls() {
    init_test_logging();
    let fixture = scenario_fixture();
    let mut i18n = ready(&fixture);

    let before = i18n.trf("Score", &tr_args!["Li", 1]);
    i18n.change_locale("zh_Hans");
    let after = i18n.trf("Score", &tr_args!["Li", 1]);

    assert_eq!(before, "Li scored 1 points");
    assert_eq!(after, "Li 得了 1 分");
    assert_eq!(i18n.current_locale(), LocaleTag::resolve("zh-Hans"));
}

#[test]
fn test_nested_directory_layout_and_plurals() {
    init_test_logging();
    let fixture = LocaleFixture::new()
        .with_file(
            "en/main.yaml",
            "Apples:\n  arg: 1\n  \"=0\": no apples\n  one: \"%d apple\"\n  other: \"%d apples\"\n",
        )
        .with_file("ru/main.json", r#"{"Apples": {"one": "%d яблоко", "few": "%d яблока", "many": "%d яблок"}}"#);
    let mut i18n = I18n::new()
        .with_locales_dir(fixture.path())
        .with_default_locale("en");
    i18n.locales_init().unwrap();

    assert_eq!(i18n.trf("Apples", &tr_args![0]), "no apples");
    assert_eq!(i18n.trf("Apples", &tr_args![1]), "1 apple");
    assert_eq!(i18n.trf("Apples", &tr_args![7]), "7 apples");

    i18n.change_locale("ru");
    assert_eq!(i18n.trf("Apples", &tr_args![21]), "21 яблоко");
    assert_eq!(i18n.trf("Apples", &tr_args![3]), "3 яблока");
    assert_eq!(i18n.trf("Apples", &tr_args![5]), "5 яблок");
}

#[test]
fn test_nested_file_named_after_a_locale() {
    init_test_logging();
    let fixture = scenario_fixture()
        .with_file("extra/de.json", r#"{"Score": "%[1]s hat %[2]d Punkte"}"#)
        .with_file("extra/main.json", r#"{"Bonus": "+%d"}"#);
    let mut i18n = ready(&fixture);

    let de = i18n.printer_for_locale("de").unwrap();
    assert_eq!(
        de.sprintf("Score", &tr_args!["Zhang", 88]),
        "Zhang hat 88 Punkte"
    );
    assert!(i18n.printer_for_locale("extra").is_ok());

    let catalog = i18n.catalog().unwrap();
    let locales: Vec<&str> = catalog
        .locales()
        .into_iter()
        .map(LocaleTag::as_str)
        .collect();
    assert_eq!(locales, vec!["de", "en-US", "extra", "zh-Hans"]);

    i18n.change_locale("de_AT");
    assert_eq!(i18n.trf("Score", &tr_args!["Ann", 2]), "Ann hat 2 Punkte");
}

#[test]
fn test_translators_run_concurrently() {
    init_test_logging();
    let fixture = scenario_fixture();
    let i18n = ready(&fixture);

    let handles: Vec<_> = ["en_US", "zh_Hans", "fr_FR", "zh_Hans_CN"]
        .into_iter()
        .map(|locale| {
            let translator = i18n
                .translator()
                .with_scope(LocaleScope::with_locale(locale));
            thread::spawn(move || {
                (0..50)
                    .map(|n| translator.trf("Score", &tr_args!["P", n]))
                    .last()
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![
            "P scored 49 points",
            "P 得了 49 分",
            "P scored 49 points",
            "P 得了 49 分",
        ]
    );
    assert_eq!(i18n.current_locale().as_str(), "en-US");
}
