//! printf-style template rendering
//!
//! Templates use Go-style verbs with optional explicit argument indexes:
//! `%[1]s scored %[2]d points`. Arguments are [`FluentValue`]s, so the same
//! values that feed Fluent messages can feed catalog templates.
//!
//! Formatting never fails. Problems are rendered inline instead:
//!
//! | Problem | Output |
//! |---------|--------|
//! | Argument missing | `%!d(MISSING)` |
//! | Index out of range or malformed | `%!d(BADINDEX)` |
//! | Template ends after `%` | `%!(NOVERB)` |
//! | Verb does not apply | `%!d(string=abc)` |
//! | Unused arguments | `%!(EXTRA number=1)` |
//!
//! Unused arguments are only reported when the template uses no explicit
//! index, since reordered templates commonly skip arguments.

use fluent::FluentValue;
use fluent_bundle::types::FluentNumber;

/// Upper bound for widths and precisions
const MAX_NUM: usize = 1_000_000;

/// Flags, width and precision of one directive
#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    plus: bool,
    minus: bool,
    sharp: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Render `template` with `args`
pub fn sprintf(template: &str, args: &[FluentValue<'_>]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    write_formatted(&mut out, template, args);
    out
}

/// Render `template` with `args`, appending to `out`
pub fn write_formatted(out: &mut String, template: &str, args: &[FluentValue<'_>]) {
    let bytes = template.as_bytes();
    let end = bytes.len();
    let mut i = 0;
    let mut arg_num = 0;
    let mut reordered = false;

    while i < end {
        let start = i;
        while i < end && bytes[i] != b'%' {
            i += 1;
        }
        out.push_str(&template[start..i]);
        if i >= end {
            break;
        }
        i += 1;

        let mut directive = Directive::default();
        while i < end {
            match bytes[i] {
                b'+' => directive.plus = true,
                b'-' => {
                    directive.minus = true;
                    directive.zero = false;
                }
                b'#' => directive.sharp = true,
                b' ' => directive.space = true,
                b'0' => directive.zero = !directive.minus,
                _ => break,
            }
            i += 1;
        }

        let mut good_index = true;
        let mut after_index = false;
        if let Some((next, index)) = parse_arg_index(bytes, i) {
            i = next;
            after_index = true;
            reordered = true;
            match index {
                Some(index) if index < args.len() => arg_num = index,
                _ => good_index = false,
            }
        }

        if let Some((width, next)) = parse_num(bytes, i) {
            directive.width = Some(width);
            i = next;
        }

        if i < end && bytes[i] == b'.' {
            i += 1;
            match parse_num(bytes, i) {
                Some((precision, next)) => {
                    directive.precision = Some(precision);
                    i = next;
                }
                None => directive.precision = Some(0),
            }
        }

        if !after_index {
            if let Some((next, index)) = parse_arg_index(bytes, i) {
                i = next;
                reordered = true;
                match index {
                    Some(index) if index < args.len() => arg_num = index,
                    _ => good_index = false,
                }
            }
        }

        let Some(verb) = template[i..].chars().next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        i += verb.len_utf8();

        if verb == '%' {
            out.push('%');
        } else if !good_index {
            out.push_str(&format!("%!{verb}(BADINDEX)"));
        } else if arg_num >= args.len() {
            out.push_str(&format!("%!{verb}(MISSING)"));
        } else {
            format_arg(out, verb, &directive, &args[arg_num]);
            arg_num += 1;
        }
    }

    if !reordered && arg_num < args.len() {
        out.push_str("%!(EXTRA ");
        for (n, arg) in args[arg_num..].iter().enumerate() {
            if n > 0 {
                out.push_str(", ");
            }
            out.push_str(type_name(arg));
            out.push('=');
            out.push_str(&display_value(arg));
        }
        out.push(')');
    }
}

/// Parse `[n]` at `i`. Returns the position after it and the zero-based
/// index, or `None` as the index when it is malformed.
fn parse_arg_index(bytes: &[u8], i: usize) -> Option<(usize, Option<usize>)> {
    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    let close = bytes[i + 1..].iter().position(|&b| b == b']');
    let Some(close) = close.map(|offset| i + 1 + offset) else {
        return Some((i + 1, None));
    };
    let index = match parse_num(bytes, i + 1) {
        Some((n, next)) if next == close && n >= 1 => Some(n - 1),
        _ => None,
    };
    Some((close + 1, index))
}

/// Parse a run of ASCII digits at `i`
fn parse_num(bytes: &[u8], i: usize) -> Option<(usize, usize)> {
    let mut n: usize = 0;
    let mut j = i;
    while let Some(digit) = bytes.get(j).filter(|b| b.is_ascii_digit()) {
        n = (n * 10 + usize::from(digit - b'0')).min(MAX_NUM);
        j += 1;
    }
    (j > i).then_some((n, j))
}

fn type_name(arg: &FluentValue<'_>) -> &'static str {
    match arg {
        FluentValue::String(_) => "string",
        FluentValue::Number(_) => "number",
        FluentValue::Custom(_) => "custom",
        FluentValue::None | FluentValue::Error => "<nil>",
    }
}

fn display_value(arg: &FluentValue<'_>) -> String {
    match arg {
        FluentValue::String(s) => s.to_string(),
        FluentValue::Number(n) => n.as_string().into_owned(),
        FluentValue::Custom(c) => format!("{c:?}"),
        FluentValue::None | FluentValue::Error => String::new(),
    }
}

fn format_arg(out: &mut String, verb: char, d: &Directive, arg: &FluentValue<'_>) {
    match arg {
        FluentValue::String(s) => format_str(out, verb, d, s),
        FluentValue::Number(n) => format_number(out, verb, d, n),
        FluentValue::Custom(c) if matches!(verb, 'v' | 's') => {
            pad(out, &format!("{c:?}"), d, false);
        }
        FluentValue::Custom(_) if verb == 'T' => pad(out, "custom", d, false),
        FluentValue::Custom(_) => bad_verb(out, verb, arg),
        FluentValue::None | FluentValue::Error => out.push_str(&format!("%!{verb}(<nil>)")),
    }
}

fn bad_verb(out: &mut String, verb: char, arg: &FluentValue<'_>) {
    out.push_str(&format!(
        "%!{verb}({}={})",
        type_name(arg),
        display_value(arg)
    ));
}

fn format_str(out: &mut String, verb: char, d: &Directive, s: &str) {
    let truncated = match d.precision {
        Some(precision) => s
            .char_indices()
            .nth(precision)
            .map_or(s, |(idx, _)| &s[..idx]),
        None => s,
    };
    match verb {
        'v' | 's' => pad(out, truncated, d, false),
        'q' => pad(out, &format!("{truncated:?}"), d, false),
        'x' | 'X' => {
            let mut hex = String::with_capacity(truncated.len() * 2);
            for (n, byte) in truncated.bytes().enumerate() {
                if d.space && n > 0 {
                    hex.push(' ');
                }
                if verb == 'x' {
                    hex.push_str(&format!("{byte:02x}"));
                } else {
                    hex.push_str(&format!("{byte:02X}"));
                }
            }
            pad(out, &hex, d, false);
        }
        'T' => pad(out, "string", d, false),
        _ => bad_verb(out, verb, &FluentValue::from(s)),
    }
}

fn format_number(out: &mut String, verb: char, d: &Directive, n: &FluentNumber) {
    let value = n.value;
    let integer = as_integer(value);

    let body = match (verb, integer) {
        ('v' | 's', _) => match d.precision {
            Some(precision) => format!("{value:.precision$}"),
            None => n.as_string().into_owned(),
        },
        ('d', Some(i)) => i.to_string(),
        ('f' | 'F', _) => {
            let precision = d.precision.unwrap_or(6);
            format!("{value:.precision$}")
        }
        ('e' | 'E', _) => {
            let formatted = exponent(value, d.precision.unwrap_or(6));
            if verb == 'E' {
                formatted.to_uppercase()
            } else {
                formatted
            }
        }
        ('g' | 'G', _) => {
            let formatted = general(value, d.precision);
            if verb == 'G' {
                formatted.to_uppercase()
            } else {
                formatted
            }
        }
        ('x' | 'X' | 'o' | 'b', Some(i)) => radix(i, verb, d.sharp),
        ('c', Some(i)) => {
            let ch = u32::try_from(i)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            pad(out, ch.encode_utf8(&mut [0; 4]), d, false);
            return;
        }
        ('q', Some(i)) => {
            let ch = u32::try_from(i)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            pad(out, &format!("{ch:?}"), d, false);
            return;
        }
        ('T', _) => {
            pad(out, "number", d, false);
            return;
        }
        _ => {
            bad_verb(out, verb, &FluentValue::Number(n.clone()));
            return;
        }
    };

    pad(out, &signed(body, d), d, true);
}

/// The value as an integer, when it has no fractional part and fits
fn as_integer(value: f64) -> Option<i64> {
    let fits = value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e18;
    // Truncation is exact: the value is integral and within range.
    fits.then(|| value as i64)
}

fn signed(body: String, d: &Directive) -> String {
    if body.starts_with('-') {
        body
    } else if d.plus {
        format!("+{body}")
    } else if d.space {
        format!(" {body}")
    } else {
        body
    }
}

fn radix(i: i64, verb: char, sharp: bool) -> String {
    let magnitude = i.unsigned_abs();
    let digits = match verb {
        'x' => format!("{magnitude:x}"),
        'X' => format!("{magnitude:X}"),
        'o' => format!("{magnitude:o}"),
        _ => format!("{magnitude:b}"),
    };
    let prefix = match (sharp, verb) {
        (true, 'x') => "0x",
        (true, 'X') => "0X",
        (true, 'o') => "0",
        (true, 'b') => "0b",
        _ => "",
    };
    let sign = if i < 0 { "-" } else { "" };
    format!("{sign}{prefix}{digits}")
}

/// `%e` layout: `1.500000e+00`
fn exponent(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    let Some((mantissa, exp)) = formatted.split_once('e') else {
        return formatted;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

/// `%g` layout: shortest form, or `precision` significant digits
fn general(value: f64, precision: Option<usize>) -> String {
    let Some(precision) = precision else {
        return value.to_string();
    };
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);
    let exp = value.abs().log10().floor();
    // The exponent of a finite non-zero f64 lies well within i32.
    let exp = exp as i32;
    let max_exp = i32::try_from(precision).unwrap_or(i32::MAX);
    if exp < -4 || exp >= max_exp {
        let formatted = exponent(value, precision - 1);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{exp}", trim_zeros(mantissa)),
            None => formatted,
        }
    } else {
        let decimals = usize::try_from(max_exp - 1 - exp).unwrap_or(0);
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn pad(out: &mut String, body: &str, d: &Directive, numeric: bool) {
    let width = d.width.unwrap_or(0);
    let len = body.chars().count();
    if len >= width {
        out.push_str(body);
        return;
    }
    let fill = width - len;
    if d.minus {
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if d.zero && numeric {
        let (sign, digits) = if body.starts_with(['+', '-', ' ']) {
            body.split_at(1)
        } else {
            ("", body)
        };
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(body);
    }
}
