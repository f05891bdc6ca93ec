//! Currency formatting with a fixed locale per currency.
//!
//! Each [`CurrencyCode`] maps to exactly one locale; the host locale is never
//! consulted. Amounts are rounded to two fraction digits, midpoint away from
//! zero, through `rust_decimal` so binary float noise does not leak into the
//! last digit.

use super::num::group_digits;
use crate::shared::CurrencyCode;
use rust_decimal::prelude::*;

/// Number conventions of one currency's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyLocale {
    pub tag: &'static str,
    pub symbol: &'static str,
    pub group: char,
    pub decimal: char,
    /// Placed between the symbol and the digits.
    pub symbol_gap: &'static str,
}

const FRACTION_DIGITS: u32 = 2;

static LOCALES: [CurrencyLocale; 3] = [
    CurrencyLocale {
        tag: "en-US",
        symbol: "$",
        group: ',',
        decimal: '.',
        symbol_gap: "",
    },
    CurrencyLocale {
        tag: "en-EU",
        symbol: "€",
        group: ',',
        decimal: '.',
        symbol_gap: "",
    },
    CurrencyLocale {
        tag: "pt-BR",
        symbol: "R$",
        group: '.',
        decimal: ',',
        symbol_gap: "\u{a0}",
    },
];

/// The locale a currency is always formatted with.
pub fn locale(currency: CurrencyCode) -> &'static CurrencyLocale {
    match currency {
        CurrencyCode::Usd => &LOCALES[0],
        CurrencyCode::Eur => &LOCALES[1],
        CurrencyCode::Brl => &LOCALES[2],
    }
}

/// Format `amount` as a currency string, e.g. `$1,234.56` or `R$ 1.234,56`.
///
/// Total: zero and negative amounts format normally, non-finite ones render
/// as `NaN` / `∞` after the symbol.
pub fn format(amount: f64, currency: CurrencyCode) -> String {
    let loc = locale(currency);

    if amount.is_nan() {
        return format!("{}{}NaN", loc.symbol, loc.symbol_gap);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}{}∞", sign, loc.symbol, loc.symbol_gap);
    }

    let (negative, fixed) = fixed_point(amount);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{}{}{}{}{}{}",
        if negative { "-" } else { "" },
        loc.symbol,
        loc.symbol_gap,
        group_digits(integer, loc.group),
        loc.decimal,
        fraction
    )
}

/// Rounds to [`FRACTION_DIGITS`] and renders the absolute value as `"123.45"`.
fn fixed_point(amount: f64) -> (bool, String) {
    match Decimal::from_f64(amount) {
        Some(value) => {
            let rounded = value
                .round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);
            let negative = amount < 0.0;
            (
                negative,
                format!("{:.prec$}", rounded.abs(), prec = FRACTION_DIGITS as usize),
            )
        }
        // Beyond Decimal's range (~7.9e28); fall back to float rendering.
        None => (
            amount < 0.0,
            format!("{:.prec$}", amount.abs(), prec = FRACTION_DIGITS as usize),
        ),
    }
}
