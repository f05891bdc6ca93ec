//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values with automatic decimal-place detection and thousands separators.
//! Locale-aware currency output lives in the `currency` sibling module and reuses
//! [`group_digits`].

/// Inserts `separator` between every group of three integer digits.
///
/// Accepts an optional leading `-`. The input must be plain ASCII digits.
pub fn group_digits(digits: &str, separator: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(sign.len() + digits.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    match trimmed.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_digits(integer, ','), fraction),
        None => group_digits(&trimmed, ','),
    }
}

fn get_decimal_places(value: f64) -> usize {
    let abs_value = value.abs();

    if abs_value >= 100.0 {
        return 0;
    }

    if abs_value >= 1.0 {
        return 2;
    }

    if abs_value == 0.0 {
        return 2;
    }

    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format an f64 for display with auto-detected decimal places.
///
/// Used for quantities such as circulating supply, which carry no currency.
pub fn display(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    display_with_decimals(amount, get_decimal_places(amount))
}

/// Format an f64 for display with explicit decimal places.
pub fn display_with_decimals(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", amount, decimals);
    display_formatted_string(formatted)
}
