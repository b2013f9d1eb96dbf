// Utility helpers for parsing and basic statistics.
//
// This module centralizes all the "dirty" CSV/number/text handling so the
// rest of the code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};
use std::collections::HashMap;

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn parse_u64_safe(s: Option<&str>) -> Option<u64> {
    // `?` propagates `None` early if the option is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<u64>().ok()
}

pub fn parse_u8_safe(s: Option<&str>) -> Option<u8> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u8>().ok()
}

/// Parse the source's "Yes"/"No" flags, case-insensitively.
///
/// Anything other than "yes" counts as `false`, which matches how the
/// source encodes the delivery flag.
pub fn parse_yes_no(s: Option<&str>) -> bool {
    matches!(s, Some(v) if v.trim().eq_ignore_ascii_case("yes"))
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Most frequent value of an iterator of strings, ties broken by first
/// occurrence. Returns `None` for an empty iterator.
pub fn mode<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut order = 0usize;
    for v in values {
        let e = counts.entry(v).or_insert_with(|| {
            order += 1;
            (0, order)
        });
        e.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(v, _)| v.to_string())
}

/// Proportional console bar, `"█"` repeated and scaled so `max` fills
/// `width` cells. Empty for non-positive maxima.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * width as f64).round() as usize;
    "█".repeat(len.min(width))
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,551 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_strips_thousands_separators() {
        assert_eq!(parse_f64_safe(Some("1,200")), Some(1200.0));
        assert_eq!(parse_f64_safe(Some(" 4.5 ")), Some(4.5));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn parse_yes_no_only_accepts_yes() {
        assert!(parse_yes_no(Some("Yes")));
        assert!(parse_yes_no(Some(" yes ")));
        assert!(!parse_yes_no(Some("No")));
        assert!(!parse_yes_no(Some("")));
        assert!(!parse_yes_no(None));
    }

    #[test]
    fn average_of_empty_slice_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[3.0, 4.0, 5.0]), 4.0);
    }

    #[test]
    fn mode_breaks_ties_by_first_occurrence() {
        let values = ["INR", "USD", "INR", "USD", "BWP"];
        assert_eq!(mode(values.iter().copied()), Some("INR".to_string()));
        assert_eq!(mode(std::iter::empty::<&str>()), None);
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(10.0, 10.0, 4), "████");
        assert_eq!(bar(5.0, 10.0, 4), "██");
        assert_eq!(bar(0.0, 10.0, 4), "");
        assert_eq!(bar(1.0, 0.0, 4), "");
    }

    #[test]
    fn format_number_two_decimals() {
        assert_eq!(format_number(4.0, 2), "4.00");
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1234.0, 0), "-1,234");
    }
}
