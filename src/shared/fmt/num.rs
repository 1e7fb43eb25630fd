//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values and pre-formatted numeric strings.
//! For `Decimal` formatting, use the `decimal` sibling module.

/// Adds thousands separators to the integer part of a formatted number.
/// The fractional part is kept as-is.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Render a transfer value the way the indexer reports it: shortest decimal
/// form, no exponent for ordinary magnitudes (`0.5`, `100`, `1.25`).
pub fn amount_string(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format!("{}", value)
}
