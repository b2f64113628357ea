//! Shared numeric helpers for the calculators.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);
pub const ONE_HUNDRED: Decimal = dec!(100);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to a whole naira, half away from zero.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-50), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Divides an annual figure into twelve equal months.
pub fn monthly(annual: Decimal) -> Decimal {
    annual / MONTHS_PER_YEAR
}

/// `part / whole` as a percentage, or zero when `whole` is not positive.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
