//! Common helpers shared by the reconciliation steps and their consumers.

use rust_decimal::Decimal;

use crate::models::Figure;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fuel_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Sums a sequence of figures. An empty sequence sums to zero.
pub fn sum_figures<I>(figures: I) -> Figure
where
    I: IntoIterator<Item = Figure>,
{
    figures.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    #[test]
    fn sum_figures_adds_values() {
        let total = sum_figures([Figure::Value(dec!(1.5)), Figure::Value(dec!(2.5))]);

        assert_eq!(total, Figure::Value(dec!(4.0)));
    }

    #[test]
    fn sum_figures_of_nothing_is_zero() {
        assert_eq!(sum_figures(Vec::new()), Figure::ZERO);
    }
}
