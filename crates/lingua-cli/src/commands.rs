//! Subcommand implementations

use anyhow::Result;
use lingua_i18n::{FluentValue, I18n, LocaleTag, Translate};
use std::io::Write;

/// Interpret a command line argument: integers and floats become numbers
pub fn parse_arg(raw: &str) -> FluentValue<'static> {
    if let Ok(n) = raw.parse::<i64>() {
        return FluentValue::from(n);
    }
    if let Ok(n) = raw.parse::<f64>() {
        if n.is_finite() {
            return FluentValue::from(n);
        }
    }
    FluentValue::from(raw.to_string())
}

/// `lingua tr`
pub fn translate<W: Write>(
    i18n: &I18n,
    out: &mut W,
    key: &str,
    raw_args: &[String],
    locale: Option<&str>,
) -> Result<()> {
    let args: Vec<FluentValue> = raw_args.iter().map(|raw| parse_arg(raw)).collect();

    let mut translator = i18n.translator();
    if let Some(locale) = locale {
        translator.change_locale(locale);
    }
    translator.trf_writer(out, key, &args)?;
    writeln!(out)?;
    Ok(())
}

/// `lingua locales`
pub fn list_locales<W: Write>(i18n: &I18n, out: &mut W) -> Result<()> {
    let Some(catalog) = i18n.catalog() else {
        return Ok(());
    };
    for locale in catalog.locales() {
        let marker = if locale == i18n.fallback_locale() {
            " (fallback)"
        } else {
            ""
        };
        writeln!(
            out,
            "{}\t{}{}",
            locale,
            catalog.keys(locale).len(),
            marker
        )?;
    }
    Ok(())
}

/// `lingua check`; returns the number of missing translations
pub fn check<W: Write>(i18n: &I18n, out: &mut W, reference: Option<&str>) -> Result<usize> {
    let Some(catalog) = i18n.catalog() else {
        return Ok(0);
    };
    let reference = match reference {
        Some(name) => LocaleTag::resolve(name),
        None => i18n.fallback_locale().clone(),
    };
    if !catalog.contains_locale(&reference) {
        anyhow::bail!("Reference locale {} has no locale file", reference);
    }

    let mut total = 0;
    for locale in catalog.locales() {
        if locale == &reference {
            continue;
        }
        let missing = catalog.missing_keys(locale, &reference);
        if missing.is_empty() {
            writeln!(out, "{locale}: complete")?;
            continue;
        }
        writeln!(out, "{locale}: {} missing", missing.len())?;
        for key in &missing {
            writeln!(out, "  {key}")?;
        }
        total += missing.len();
    }
    Ok(total)
}
