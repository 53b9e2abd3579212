use std::path::Path;

use irs_core::{
    BracketTableProvider, TaxProfile, TaxProfileInput, TaxResult, ValidationError,
    compute_with_provider,
};
use irs_data::{BracketTableLoaderError, StaticBracketProvider};
use tracing::{debug, info};

use crate::scenarios::{self, Alternative};

/// A computed profile, optionally with its what-if alternatives.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub profile: TaxProfile,
    pub result: TaxResult,
    pub alternatives: Option<Vec<Alternative>>,
}

/// Loads the bracket tables, preferring external files when given.
pub fn load_provider(
    brackets: Option<&Path>,
    reference_index: Option<&Path>,
) -> Result<StaticBracketProvider, BracketTableLoaderError> {
    let provider = StaticBracketProvider::load(brackets, reference_index)?;
    debug!(
        tables = provider.len(),
        external = brackets.is_some() || reference_index.is_some(),
        "bracket tables ready"
    );
    Ok(provider)
}

/// Lists the (year, region) tables a provider holds, e.g. `2023 Mainland, 2024 Azores`.
pub fn available_tables<P>(provider: &P) -> String
where
    P: BracketTableProvider + ?Sized,
{
    let tables: Vec<String> = provider
        .available()
        .into_iter()
        .map(|(year, region)| format!("{year} {region}"))
        .collect();
    if tables.is_empty() {
        "none".to_string()
    } else {
        tables.join(", ")
    }
}

/// Validates `input`, computes its taxes and, when asked, the alternatives.
pub fn evaluate<P>(
    provider: &P,
    input: TaxProfileInput,
    compare: bool,
) -> Result<Evaluation, ValidationError>
where
    P: BracketTableProvider + ?Sized,
{
    let profile = input.validate()?;
    info!(%profile, "computing");

    let result = compute_with_provider(provider, &profile)?;
    let alternatives = compare.then(|| scenarios::compare(provider, &profile, &result));

    Ok(Evaluation {
        profile,
        result,
        alternatives,
    })
}
