//! Solidarity surtax on high gross incomes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::progressive::progressive_tax;
use crate::models::Residence;

const THRESHOLDS: [Decimal; 4] = [dec!(75000), dec!(80000), dec!(200000), dec!(300000)];
const RATES: [Decimal; 5] = [dec!(0), dec!(0.40), dec!(0.025), dec!(0.10), dec!(0.05)];

/// Surtax on gross income. Only ordinary residents pay it.
pub fn solidarity_tax(
    residence: Residence,
    gross_income: Decimal,
) -> Decimal {
    match residence {
        Residence::Resident => progressive_tax(gross_income, &THRESHOLDS, &RATES),
        Residence::NonResident | Residence::NonHabitualResident => Decimal::ZERO,
    }
}
