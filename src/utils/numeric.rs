// src/utils/numeric.rs
//! Coercion of captured numeric text into canonical form.
//!
//! Extractors only call these after a successful pattern match, so inputs
//! are already shaped like numbers; the `Result` variants cover overflow and
//! the odd stray character a loose capture group lets through.

use crate::utils::error::ExtractError;

/// Canonical decimal text for a captured amount.
///
/// Thousands separators are dropped and parenthesis notation becomes a
/// leading minus: `"(1,234.50)"` -> `"-1234.50"`. Text that is not
/// parenthesised is returned without separators and otherwise untouched.
pub fn normalize_amount(raw: &str) -> String {
    let cleaned = raw.trim().replace(',', "");
    let negative = cleaned.starts_with('(');
    let inner = cleaned.trim_start_matches('(').trim_end_matches(')').trim();

    if negative && !inner.starts_with('-') {
        format!("-{}", inner)
    } else {
        inner.to_string()
    }
}

/// True when `value` is three all-digit `:`-separated parts (`HH:MM:SS`).
pub fn is_valid_time(value: &str) -> bool {
    let parts: Vec<&str> = value.trim().split(':').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Rounds to two decimal places from the exact binary value, ties to even.
///
/// Scaling by 100 first would turn `20.125` into a different float before
/// rounding; formatting works on the exact expansion instead.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse::<f64>().unwrap_or(value)
}

/// Settlement amount recomputed from quantity and unit price.
pub fn computed_net_total(quantity: u64, price: f64) -> f64 {
    round2(quantity as f64 * price)
}

/// Renders a float in shortest round-trip form, always with a decimal point.
pub fn format_decimal(value: f64) -> String {
    let rendered = format!("{}", value);
    if rendered.contains('.') || !value.is_finite() {
        rendered
    } else {
        format!("{}.0", rendered)
    }
}

pub fn parse_quantity(raw: &str) -> Result<u64, ExtractError> {
    raw.trim()
        .replace(',', "")
        .parse::<u64>()
        .map_err(|_| ExtractError::InvalidNumber {
            field: "quantity",
            value: raw.to_string(),
        })
}

pub fn parse_price(raw: &str) -> Result<f64, ExtractError> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ExtractError::InvalidNumber {
            field: "price",
            value: raw.to_string(),
        })
}
