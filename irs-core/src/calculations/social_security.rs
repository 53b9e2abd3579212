//! Mandatory social security contributions.
//!
//! Employees contribute a flat share of gross wages. Independent workers
//! follow an accrual schedule anchored on the month their activity opened:
//!
//! | Period | Contribution |
//! |--------|--------------|
//! | First 12 months after opening | exempt |
//! | Until the first quarterly declaration | flat monthly fee |
//! | Afterwards | rate × income of the invoiced months |
//!
//! Months are counted up to the first day after the fiscal year.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{Category, IndependentActivity, TaxProfile, TaxYearRules};

const MONTHS_PER_YEAR: i64 = 12;
const MONTHS_PER_QUARTER: u32 = 3;

/// Contribution schedule of an independent activity within a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualSchedule {
    /// Whole months from opening to January 1 of the following year.
    pub months_since_opened: i64,
    /// Months charged the flat fee before the first quarterly declaration.
    pub months_to_first_declaration: u32,
    /// Months of the fiscal year whose income bears the contribution rate.
    pub invoiced_months: i64,
}

impl AccrualSchedule {
    pub fn new(
        activity: &IndependentActivity,
        year: i32,
        rules: &TaxYearRules,
    ) -> Self {
        let months_since_opened = months_since_opened(activity.opened_at(), year);
        let months_to_first_declaration = months_to_first_declaration(activity.opened_month());
        let invoiced_months = (months_since_opened
            - rules.ss_exemption_months
            - i64::from(months_to_first_declaration))
        .clamp(0, MONTHS_PER_YEAR);

        Self {
            months_since_opened,
            months_to_first_declaration,
            invoiced_months,
        }
    }
}

/// Whole months between `opened_at` and the first day after fiscal `year`.
pub fn months_since_opened(
    opened_at: NaiveDate,
    year: i32,
) -> i64 {
    let year_end = i64::from(year) + 1;
    MONTHS_PER_YEAR * (year_end - i64::from(opened_at.year())) + 1 - i64::from(opened_at.month())
}

/// Months from the opening month until the next quarterly declaration cycle.
pub fn months_to_first_declaration(opened_month: u32) -> u32 {
    MONTHS_PER_QUARTER - (opened_month - 1) % MONTHS_PER_QUARTER
}

/// Social security due for the fiscal year, rounded to cents.
pub fn social_security_tax(profile: &TaxProfile) -> Decimal {
    let rules = profile.rules();
    let gross = profile.gross_income();

    match profile.category() {
        Category::Employee => round_half_up(gross * rules.employee_ss_rate),
        Category::Independent(activity) => {
            let schedule = AccrualSchedule::new(activity, profile.year(), rules);
            debug!(?schedule, "independent worker accrual schedule");

            // Months last: gross × months can exceed Decimal::MAX.
            let monthly_rate = rules.independent_ss_rate / Decimal::from(MONTHS_PER_YEAR);
            let contribution =
                gross * monthly_rate * Decimal::from(schedule.invoiced_months);
            let transition =
                Decimal::from(schedule.months_to_first_declaration) * rules.ss_transition_monthly_fee;

            round_half_up(contribution + transition)
        }
    }
}
