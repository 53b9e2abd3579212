use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fiscal years the rule table covers.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2023..=2025;

/// How the specific deduction for employment income is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecificDeduction {
    /// A fixed amount in euros.
    Fixed(Decimal),
    /// A multiple of the year's reference index (IAS).
    Indexed(Decimal),
}

impl SpecificDeduction {
    pub fn amount(
        &self,
        reference_index: Decimal,
    ) -> Decimal {
        match *self {
            Self::Fixed(amount) => amount,
            Self::Indexed(multiplier) => multiplier * reference_index,
        }
    }
}

/// Statutory parameters for one fiscal year.
///
/// Progressive brackets live in the [`BracketTable`]; everything else that
/// varies by year is collected here so adding a year is a new match arm in
/// [`TaxYearRules::for_year`].
///
/// [`BracketTable`]: crate::models::BracketTable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearRules {
    pub specific_deduction: SpecificDeduction,

    /// Employee social security rate on gross wages.
    pub employee_ss_rate: Decimal,
    /// Independent worker social security rate on invoiced income.
    pub independent_ss_rate: Decimal,
    /// Flat monthly contribution before the first quarterly declaration.
    pub ss_transition_monthly_fee: Decimal,
    /// Months after opening an activity with no contribution due.
    pub ss_exemption_months: i64,

    /// Taxable share of services income in the simplified regime.
    pub services_coefficient: Decimal,
    /// Share of gross income presumed to be business costs that must be justified.
    pub generic_cost_allowance: Decimal,
    /// Extra discount on the coefficient in the year the activity opened.
    pub first_year_discount: Decimal,
    /// Extra discount on the coefficient in the year after opening.
    pub second_year_discount: Decimal,

    pub nhr_rate: Decimal,
    pub nhr_azores_reduction: Decimal,
    pub non_resident_rate: Decimal,
}

impl TaxYearRules {
    /// Returns the rule set for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedYear`] if `year` is outside
    /// [`SUPPORTED_YEARS`].
    pub fn for_year(year: i32) -> Result<Self, ValidationError> {
        let specific_deduction = match year {
            2023 => SpecificDeduction::Fixed(dec!(4104)),
            2024..=2025 => SpecificDeduction::Indexed(dec!(8.54)),
            _ => {
                return Err(ValidationError::UnsupportedYear {
                    year,
                    min: *SUPPORTED_YEARS.start(),
                    max: *SUPPORTED_YEARS.end(),
                });
            }
        };

        Ok(Self {
            specific_deduction,
            employee_ss_rate: dec!(0.11),
            independent_ss_rate: dec!(0.1125),
            ss_transition_monthly_fee: dec!(20),
            ss_exemption_months: 12,
            services_coefficient: dec!(0.75),
            generic_cost_allowance: dec!(0.15),
            first_year_discount: dec!(0.5),
            second_year_discount: dec!(0.25),
            nhr_rate: dec!(0.20),
            nhr_azores_reduction: dec!(0.30),
            non_resident_rate: dec!(0.25),
        })
    }
}
