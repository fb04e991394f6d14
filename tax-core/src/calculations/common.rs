//! Shared arithmetic helpers for the calculators.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Months in a tax year, used to annualise and de-annualise amounts.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rounds to two decimal places, midpoints away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2166.666)), dec!(2166.67));
/// assert_eq!(round_half_up(dec!(2.895)), dec!(2.90));
/// assert_eq!(round_half_up(dec!(-26000.005)), dec!(-26000.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Divides `numerator` by `denominator`, treating a non-positive
/// denominator as a zero ratio.
///
/// # Arguments
///
/// * `numerator` - The amount being compared
/// * `denominator` - The base it is compared against
///
/// # Returns
///
/// `Some(numerator / denominator)`, `Some(0)` when the denominator is zero
/// or negative, or `None` when the quotient overflows.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(
///     ratio_or_zero(dec!(896000), dec!(6000000)).map(|r| r.round_dp(4)),
///     Some(dec!(0.1493))
/// );
/// assert_eq!(ratio_or_zero(dec!(10), dec!(0)), Some(dec!(0)));
/// assert_eq!(ratio_or_zero(Decimal::MAX, dec!(0.0001)), None);
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Option<Decimal> {
    if denominator > Decimal::ZERO {
        numerator.checked_div(denominator)
    } else {
        Some(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(2166.664)), dec!(2166.66));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(2166.665)), dec!(2166.67));
    }

    #[test]
    fn round_half_up_rounds_negative_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        let value = dec!(26000) / dec!(12);

        assert_eq!(round_half_up(value), dec!(2166.67));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(200000), dec!(60000)), dec!(200000));
        assert_eq!(max(dec!(60000), dec!(300000)), dec!(300000));
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(150.00), dec!(150.00)), dec!(150.00));
    }

    // =========================================================================
    // ratio_or_zero tests
    // =========================================================================

    #[test]
    fn ratio_or_zero_divides_positive_denominator() {
        let ratio = ratio_or_zero(dec!(26000), dec!(896000)).unwrap();

        assert_eq!(round_half_up(ratio * dec!(100)), dec!(2.90));
    }

    #[test]
    fn ratio_or_zero_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(5), dec!(0)), Some(dec!(0)));
    }

    #[test]
    fn ratio_or_zero_reports_overflow_as_none() {
        assert_eq!(
            ratio_or_zero(dec!(-12000000), dec!(0.0000000000000000000000000001)),
            None
        );
    }

    #[test]
    fn months_per_year_is_twelve() {
        assert_eq!(MONTHS_PER_YEAR, dec!(12));
    }
}
