//! Piecewise-linear progressive taxation.
//!
//! Used both for the ordinary IRS brackets and for the solidarity surtax, so
//! nothing here knows about specific thresholds or rates.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Applies a progressive schedule to `income`.
///
/// `rates[i]` taxes the slice of income above `thresholds[i - 1]` (zero for
/// the first slice) up to `thresholds[i]`; the last rate taxes everything
/// above the top threshold. An income exactly on a threshold is fully taxed
/// by the bracket that ends there.
///
/// `thresholds` must be strictly ascending and `rates` must hold exactly one
/// more entry than `thresholds`, as [`BracketTable`] guarantees.
///
/// Returns zero for non-positive income. The result is rounded half-up to
/// cents.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use irs_core::calculations::progressive_tax;
///
/// let thresholds = [dec!(10000), dec!(20000)];
/// let rates = [dec!(0.10), dec!(0.20), dec!(0.30)];
///
/// assert_eq!(progressive_tax(dec!(5000), &thresholds, &rates), dec!(500.00));
/// assert_eq!(progressive_tax(dec!(25000), &thresholds, &rates), dec!(4500.00));
/// ```
///
/// [`BracketTable`]: crate::models::BracketTable
pub fn progressive_tax(
    income: Decimal,
    thresholds: &[Decimal],
    rates: &[Decimal],
) -> Decimal {
    debug_assert_eq!(rates.len(), thresholds.len() + 1);

    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    // Number of thresholds reached by the income.
    let reached = thresholds.iter().take_while(|&&t| t <= income).count();

    let mut lower = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    for (&upper, &rate) in thresholds[..reached].iter().zip(rates) {
        tax += (upper - lower) * rate;
        lower = upper;
    }
    tax += (income - lower) * rates[reached];

    round_half_up(tax)
}
