//! Family quotient and dependent deductions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::MaritalStatus;

const DEPENDENT_DEDUCTION: Decimal = dec!(600);
const TODDLER_SUPPLEMENT: Decimal = dec!(126);
const TODDLER_MAX_AGE: u32 = 3;
const YOUNG_SIBLING_SUPPLEMENT: Decimal = dec!(300);
const YOUNG_SIBLING_MAX_AGE: u32 = 6;
const DEPENDENT_QUOTIENT_SHARE: Decimal = dec!(0.25);

/// Household adjustments to the progressive income tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyAllowance {
    /// Divisor applied to the taxable base before the bracket lookup.
    pub quotient: Decimal,
    /// Amount subtracted from the collected tax.
    pub deduction: Decimal,
}

impl FamilyAllowance {
    pub fn for_household(
        status: MaritalStatus,
        dependent_ages: &[u32],
    ) -> Self {
        Self {
            quotient: family_quotient(status, dependent_ages),
            deduction: family_deduction(status, dependent_ages),
        }
    }
}

/// Income splitting divisor.
///
/// A single declarant has a quotient of 1. A joint declaration starts at 2,
/// gains 0.25 when there are any dependents, and another 0.25 per
/// dependent, the first one included.
pub fn family_quotient(
    status: MaritalStatus,
    dependent_ages: &[u32],
) -> Decimal {
    match status {
        MaritalStatus::Single => Decimal::ONE,
        MaritalStatus::Joint if dependent_ages.is_empty() => Decimal::TWO,
        MaritalStatus::Joint => {
            // The first dependent counts twice; kept as observed in the
            // published calculator until the intended rule is confirmed.
            let per_dependent = DEPENDENT_QUOTIENT_SHARE * Decimal::from(dependent_ages.len());
            Decimal::TWO + DEPENDENT_QUOTIENT_SHARE + per_dependent
        }
    }
}

/// Deduction for dependents.
///
/// Every dependent is worth 600, those aged three or less another 126, and
/// every dependent except the youngest aged six or less another 300. A
/// separate declaration claims half, as custody is assumed to be shared.
pub fn family_deduction(
    status: MaritalStatus,
    dependent_ages: &[u32],
) -> Decimal {
    if dependent_ages.is_empty() {
        return Decimal::ZERO;
    }

    let mut deduction = DEPENDENT_DEDUCTION * Decimal::from(dependent_ages.len());

    let toddlers = dependent_ages
        .iter()
        .filter(|&&age| age <= TODDLER_MAX_AGE)
        .count();
    deduction += TODDLER_SUPPLEMENT * Decimal::from(toddlers);

    let mut sorted = dependent_ages.to_vec();
    sorted.sort_unstable();
    let young_siblings = sorted[1..]
        .iter()
        .filter(|&&age| age <= YOUNG_SIBLING_MAX_AGE)
        .count();
    deduction += YOUNG_SIBLING_SUPPLEMENT * Decimal::from(young_siblings);

    match status {
        MaritalStatus::Single => deduction / Decimal::TWO,
        MaritalStatus::Joint => deduction,
    }
}
