//! Parsing and display of naira amounts typed into, or shown by, a form.
//!
//! Parsing never fails: anything that does not start with a number reads as
//! zero, and negative amounts clamp to zero.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, round_half_up, round_whole};

pub const CURRENCY_SYMBOL: char = '₦';

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("leading number pattern is valid")
});

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("leading integer pattern is valid"));

/// Parses a typed amount such as `"₦1,250,000.50"`.
///
/// Strips the currency symbol, commas, and whitespace, then reads the leading
/// decimal number. Trailing garbage is ignored (`"12abc"` reads as 12).
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::parse_amount;
///
/// assert_eq!(parse_amount("₦1,250,000.50"), dec!(1250000.50));
/// assert_eq!(parse_amount("not a number"), Decimal::ZERO);
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != CURRENCY_SYMBOL && *c != ',' && !c.is_whitespace())
        .collect();

    let Some(found) = LEADING_NUMBER.find(&cleaned) else {
        if !cleaned.is_empty() {
            debug!(input = %raw, "amount is not numeric, reading as zero");
        }
        return Decimal::ZERO;
    };

    let number = found.as_str().trim_start_matches('+').trim_end_matches('.');

    match Decimal::from_str(number) {
        Ok(value) => max(value, Decimal::ZERO),
        Err(e) => {
            debug!(input = %raw, "amount out of range, reading as zero: {}", e);
            Decimal::ZERO
        }
    }
}

/// Parses an amount for a whole-naira field: `max(0, round(parse_amount(raw)))`.
pub fn parse_whole_amount(raw: &str) -> Decimal {
    round_whole(parse_amount(raw))
}

/// Reads a typed year such as `"2021"`.
///
/// Only the leading ASCII digits count (`"20x6"` reads as 20). Input with no
/// leading digits, or a value outside `i32`, is no year at all.
pub fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let year: Option<i32> = LEADING_INTEGER
        .find(trimmed)
        .and_then(|found| found.as_str().trim_start_matches('+').parse().ok());

    if year.is_none() && !trimmed.is_empty() {
        debug!(input = %raw, "year is not numeric, ignoring it");
    }
    year
}

/// Renders an amount for display.
///
/// Zero renders as `₦0`. Whole amounts get thousands separators and no
/// decimals; anything else is rounded to exactly two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::format_amount;
///
/// assert_eq!(format_amount(dec!(0)), "₦0");
/// assert_eq!(format_amount(dec!(3000000)), "₦3,000,000");
/// assert_eq!(format_amount(dec!(1234.5)), "₦1,234.50");
/// ```
pub fn format_amount(value: Decimal) -> String {
    if value.is_zero() {
        return format!("{CURRENCY_SYMBOL}0");
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let magnitude = value.abs();

    let digits = if magnitude.fract().is_zero() {
        format!("{:.0}", magnitude)
    } else {
        format!("{:.2}", round_half_up(magnitude))
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut rendered = format!("{CURRENCY_SYMBOL}{sign}{}", group_thousands(whole));
    if let Some(fraction) = fraction {
        rendered.push('.');
        rendered.push_str(fraction);
    }
    rendered
}

/// Renders a percentage with two decimals, e.g. `13.80%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
