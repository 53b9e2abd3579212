//! Rounding and clamping helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use irs_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(6291.505)), dec!(6291.51));
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio to four decimal places (hundredths of a percent).
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero if it is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use irs_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10.00)), dec!(0));
/// assert_eq!(non_negative(dec!(10.00)), dec!(10.00));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
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
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(1088.865));

        assert_eq!(result, dec!(1088.87));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint_with_even_digit() {
        let result = round_half_up(dec!(6291.505));

        assert_eq!(result, dec!(6291.51));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(dec!(0.00));

        assert_eq!(result, dec!(0.00));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // round_rate tests
    // =========================================================================

    #[test]
    fn round_rate_keeps_four_places() {
        let result = round_rate(dec!(0.319717));

        assert_eq!(result, dec!(0.3197));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_clamps_negative_to_zero() {
        let result = non_negative(dec!(-0.01));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn non_negative_passes_positive_through() {
        let result = non_negative(dec!(42.42));

        assert_eq!(result, dec!(42.42));
    }
}
