//! Base amount subject to ordinary progressive taxation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::non_negative;
use crate::models::{Category, IndependentActivity, TaxProfile, TaxYearRules};

/// The standard deduction on employment income for the year.
pub fn specific_deduction(
    rules: &TaxYearRules,
    reference_index: Decimal,
) -> Decimal {
    rules.specific_deduction.amount(reference_index)
}

/// Derives the taxable base for `profile`, unrounded.
///
/// Employees deduct the larger of the specific deduction and their social
/// security contributions. Independent workers are taxed on the services
/// coefficient of gross income, discounted during the first two years of
/// activity, plus the part of the generic cost allowance that is not
/// covered by deductions or declared expenses.
pub fn taxable_base(
    profile: &TaxProfile,
    specific_deduction: Decimal,
    social_security_tax: Decimal,
) -> Decimal {
    let gross = profile.gross_income();
    let deductible = specific_deduction.max(social_security_tax);

    match profile.category() {
        Category::Employee => non_negative(gross - deductible),
        Category::Independent(activity) => {
            let rules = profile.rules();
            let discount = extra_discount(rules, activity, profile.year());
            let add_back = not_incurred_expenses(rules, gross, deductible, activity.expenses());
            debug!(%discount, %add_back, "independent worker base adjustments");

            gross * rules.services_coefficient * (Decimal::ONE - discount) + add_back
        }
    }
}

/// Discount on the services coefficient for a recently opened activity.
pub fn extra_discount(
    rules: &TaxYearRules,
    activity: &IndependentActivity,
    year: i32,
) -> Decimal {
    match year - activity.opened_year() {
        0 => rules.first_year_discount,
        1 => rules.second_year_discount,
        _ => Decimal::ZERO,
    }
}

/// Portion of the generic cost allowance not absorbed by the larger of the
/// specific deduction and social security, nor by declared expenses.
pub fn not_incurred_expenses(
    rules: &TaxYearRules,
    gross_income: Decimal,
    deductible: Decimal,
    expenses: Decimal,
) -> Decimal {
    non_negative(gross_income * rules.generic_cost_allowance - deductible - expenses)
}
