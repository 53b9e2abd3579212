//! What-if comparisons against a computed baseline.

use irs_core::{
    BracketTableProvider, Region, Residence, TaxProfile, TaxResult, compute_with_provider,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// One recomputed variation of the baseline profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternative {
    pub description: String,
    pub total_tax: Decimal,
    pub monthly_net: Decimal,
    /// Baseline total minus this alternative's total; positive means savings.
    pub gain: Decimal,
}

/// Recomputes `profile` under the regime, declaration and household
/// variations that apply to it.
///
/// Variations whose bracket table the provider cannot supply are skipped.
pub fn compare<P>(
    provider: &P,
    profile: &TaxProfile,
    baseline: &TaxResult,
) -> Vec<Alternative>
where
    P: BracketTableProvider + ?Sized,
{
    let mut variations = Vec::new();

    if profile.residence() != Residence::NonHabitualResident {
        variations.push((
            "Non-Habitual Resident".to_string(),
            profile.with_residence(Residence::NonHabitualResident, Region::Mainland),
        ));
    }

    let toggled = profile.marital_status().toggled();
    variations.push((
        format!("{} Declaration", toggled.label()),
        profile.with_marital_status(toggled),
    ));

    if profile.has_dependents() {
        variations.push(("No Dependents".to_string(), profile.without_dependents()));
    }

    variations
        .into_iter()
        .filter_map(|(description, variation)| {
            match compute_with_provider(provider, &variation) {
                Ok(result) => {
                    let gain = baseline.total_tax - result.total_tax;
                    debug!(%description, total_tax = %result.total_tax, %gain, "scenario");
                    Some(Alternative {
                        description,
                        total_tax: result.total_tax,
                        monthly_net: result.monthly_net,
                        gain,
                    })
                }
                Err(error) => {
                    warn!(%description, %error, "skipping scenario");
                    None
                }
            }
        })
        .collect()
}
