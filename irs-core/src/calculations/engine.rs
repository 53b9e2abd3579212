//! Orchestration of the full tax computation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use irs_core::{BracketTable, IncomeTaxEngine, TaxProfileInput};
//!
//! let table = BracketTable::new(
//!     vec![dec!(7479), dec!(11284), dec!(15992), dec!(20700), dec!(26355),
//!          dec!(38632), dec!(50483), dec!(78834)],
//!     vec![dec!(0.145), dec!(0.21), dec!(0.265), dec!(0.285), dec!(0.35),
//!          dec!(0.37), dec!(0.435), dec!(0.45), dec!(0.48)],
//!     dec!(480.43),
//! )
//! .unwrap();
//!
//! let profile = TaxProfileInput {
//!     year: Some(2023),
//!     income: Some(dec!(30000)),
//!     ..Default::default()
//! }
//! .validate()
//! .unwrap();
//!
//! let result = IncomeTaxEngine::new(&table).compute(&profile);
//!
//! assert_eq!(result.social_security_tax, dec!(3300.00));
//! assert_eq!(result.income_tax, dec!(6291.51));
//! assert_eq!(result.monthly_net, dec!(1700.71));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::common::{round_half_up, round_rate};
use crate::calculations::family::FamilyAllowance;
use crate::calculations::progressive::progressive_tax;
use crate::calculations::social_security::social_security_tax;
use crate::calculations::solidarity::solidarity_tax;
use crate::calculations::taxable_base::{specific_deduction, taxable_base};
use crate::error::ValidationError;
use crate::models::{BracketTable, Regime, TaxProfile, TaxResult, TaxYearRules};
use crate::provider::BracketTableProvider;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Computes the liability of a profile against the table for its year and region.
pub fn compute(
    profile: &TaxProfile,
    table: &BracketTable,
) -> TaxResult {
    IncomeTaxEngine::new(table).compute(profile)
}

/// Looks up the profile's bracket table and computes its liability.
///
/// # Errors
///
/// Returns [`ValidationError::MissingBracketData`] if `provider` has no table
/// for the profile's year and region.
pub fn compute_with_provider<P>(
    provider: &P,
    profile: &TaxProfile,
) -> Result<TaxResult, ValidationError>
where
    P: BracketTableProvider + ?Sized,
{
    let table = provider.bracket_table(profile.year(), profile.region())?;
    Ok(compute(profile, table))
}

/// Income tax calculator bound to one bracket table.
#[derive(Debug, Clone)]
pub struct IncomeTaxEngine<'a> {
    table: &'a BracketTable,
}

impl<'a> IncomeTaxEngine<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Derives every component of the liability once and combines them.
    pub fn compute(
        &self,
        profile: &TaxProfile,
    ) -> TaxResult {
        let rules = profile.rules();
        let gross = profile.gross_income();
        let regime = Regime::select(profile.residence(), profile.region());

        let social_security_tax = social_security_tax(profile);
        let specific_deduction = specific_deduction(rules, self.table.reference_index());
        let taxable_base = taxable_base(profile, specific_deduction, social_security_tax);
        let family =
            FamilyAllowance::for_household(profile.marital_status(), profile.dependent_ages());
        debug!(
            ?regime,
            %social_security_tax,
            %specific_deduction,
            %taxable_base,
            quotient = %family.quotient,
            family_deduction = %family.deduction,
            "derived pipeline values"
        );

        let income_tax = self.income_tax(regime, rules, gross, taxable_base, &family);
        let solidarity_tax = solidarity_tax(profile.residence(), gross);
        let total_tax = income_tax + social_security_tax + solidarity_tax;

        let effective_rate = if gross.is_zero() {
            Decimal::ZERO
        } else {
            round_rate(total_tax / gross)
        };

        TaxResult {
            regime,
            wages: gross,
            taxable_base: round_half_up(taxable_base),
            family_quotient: family.quotient,
            family_deduction: family.deduction,
            income_tax,
            social_security_tax,
            solidarity_tax,
            total_tax,
            effective_rate,
            monthly_net: round_half_up((gross - total_tax) / MONTHS_PER_YEAR),
        }
    }

    fn income_tax(
        &self,
        regime: Regime,
        rules: &TaxYearRules,
        gross: Decimal,
        taxable_base: Decimal,
        family: &FamilyAllowance,
    ) -> Decimal {
        match regime {
            Regime::NonResident => round_half_up(gross * rules.non_resident_rate),
            Regime::NonHabitualResident { azores } => {
                let reduction = if azores {
                    rules.nhr_azores_reduction
                } else {
                    Decimal::ZERO
                };
                round_half_up(taxable_base * rules.nhr_rate * (Decimal::ONE - reduction))
            }
            Regime::Resident => {
                let share = taxable_base / family.quotient;
                let collected = family.quotient
                    * progressive_tax(share, self.table.thresholds(), self.table.rates());
                if family.deduction > collected {
                    warn!(
                        %collected,
                        deduction = %family.deduction,
                        "family deduction exceeds the collected tax"
                    );
                }
                round_half_up(collected - family.deduction)
            }
        }
    }
}
