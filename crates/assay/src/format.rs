//! Number formatting shared by cell stringification and fact rendering.

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Fold -0.0 so "-0.0" never shows up in output
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest round-trip representation, keeping one decimal for whole values.
///
/// `75.0` stays `75.0`, `0.1` stays `0.1`, `2.345` stays `2.345`.
pub fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Integer with thousands separators (`1234567` -> `1,234,567`).
pub fn grouped(value: usize) -> String {
    group_digits(&value.to_string())
}

/// Float with thousands separators and a fixed number of decimals.
///
/// Non-finite values render as `N/A`.
pub fn number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + 4);
    // A value that rounds to zero prints without a sign
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
