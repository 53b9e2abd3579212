use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Regime;

/// Outcome of a tax computation for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,

    /// Annual gross income.
    pub wages: Decimal,

    // Intermediate values
    pub taxable_base: Decimal,
    pub family_quotient: Decimal,
    pub family_deduction: Decimal,

    // Liabilities
    pub income_tax: Decimal,
    pub social_security_tax: Decimal,
    pub solidarity_tax: Decimal,
    pub total_tax: Decimal,

    /// Total tax as a fraction of gross income, zero when there is no income.
    pub effective_rate: Decimal,
    /// Net income per month over twelve payments.
    pub monthly_net: Decimal,
}
