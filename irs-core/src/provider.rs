use thiserror::Error;

use crate::error::ValidationError;
use crate::models::{BracketTable, Region};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no bracket table for {year} in {region}")]
    NotFound { year: i32, region: Region },
}

impl From<ProviderError> for ValidationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound { year, region } => {
                ValidationError::MissingBracketData { year, region }
            }
        }
    }
}

/// Read-only source of bracket tables keyed by fiscal year and region.
///
/// Implementations must not mutate tables once handed out; lookups may run
/// concurrently.
pub trait BracketTableProvider: Send + Sync {
    fn bracket_table(
        &self,
        year: i32,
        region: Region,
    ) -> Result<&BracketTable, ProviderError>;

    /// Every (year, region) pair the provider can answer, sorted.
    fn available(&self) -> Vec<(i32, Region)>;
}
