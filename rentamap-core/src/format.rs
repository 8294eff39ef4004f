use num_format::{Locale, ToFormattedString};

use crate::feature::PropertyValue;

/// Format a raw attribute value for display, falling back to `"0"`.
///
/// This is the single numeric-safety choke point: every raw value that
/// reaches the user goes through here, so missing or malformed data degrades
/// to a displayed zero instead of an error. Never fails.
pub fn format_value(raw: Option<&PropertyValue>) -> String {
    match parse_number(raw) {
        Some(n) => format_number(n),
        None => "0".to_string(),
    }
}

/// Parse a raw attribute value into a finite number, if it holds one.
///
/// Text values are parsed the way the tile pipeline wrote them: a leading
/// numeric literal counts, trailing junk is ignored (`"450 uds"` → 450).
pub fn parse_number(raw: Option<&PropertyValue>) -> Option<f64> {
    let value = match raw? {
        PropertyValue::Number(n) => *n,
        PropertyValue::Text(s) => numeric_prefix(s)?,
    };
    value.is_finite().then_some(value)
}

/// Format a number with Spanish conventions: dot as thousands separator,
/// comma as decimal separator, at most three fraction digits, none forced.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let negative = value < 0.0;
    // Round to the displayed precision first so 0.9999 carries into the
    // integer part instead of printing as ",999".
    let abs = (value.abs() * 1000.0).round() / 1000.0;
    let int_part = abs.trunc() as i64;
    let mut out = int_part.to_formatted_string(&Locale::es);
    let frac = ((abs - abs.trunc()) * 1000.0).round() as u32;
    if frac > 0 {
        let digits = format!("{frac:03}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    if negative && (int_part > 0 || frac > 0) {
        out.insert(0, '-');
    }
    out
}

/// Longest numeric prefix of `s`, `parseFloat`-style.
fn numeric_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    // Optional exponent, only if complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    t[..end].parse().ok()
}
