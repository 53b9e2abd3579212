use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape errors for a [`BracketTable`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BracketTableError {
    /// There must be exactly one more rate than thresholds.
    #[error("expected {expected} rates for {thresholds} thresholds, got {actual}")]
    RateCountMismatch {
        thresholds: usize,
        expected: usize,
        actual: usize,
    },

    /// Thresholds must be positive.
    #[error("threshold {0} must be positive")]
    NonPositiveThreshold(Decimal),

    /// Thresholds must be strictly increasing.
    #[error("threshold {current} does not exceed the previous threshold {previous}")]
    ThresholdsNotAscending { previous: Decimal, current: Decimal },

    /// Rates are fractions and must not be negative.
    #[error("rate {0} must not be negative")]
    NegativeRate(Decimal),
}

/// Progressive bracket table for one fiscal year and region.
///
/// `rates[i]` applies to income above `thresholds[i - 1]` (or zero) up to and
/// including `thresholds[i]`; the last rate applies above the top threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    thresholds: Vec<Decimal>,
    rates: Vec<Decimal>,
    reference_index: Decimal,
}

impl BracketTable {
    /// Builds a table, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if:
    /// - `rates.len() != thresholds.len() + 1`
    /// - a threshold is not positive or not above its predecessor
    /// - a rate is negative
    pub fn new(
        thresholds: Vec<Decimal>,
        rates: Vec<Decimal>,
        reference_index: Decimal,
    ) -> Result<Self, BracketTableError> {
        if rates.len() != thresholds.len() + 1 {
            return Err(BracketTableError::RateCountMismatch {
                thresholds: thresholds.len(),
                expected: thresholds.len() + 1,
                actual: rates.len(),
            });
        }

        let mut previous = Decimal::ZERO;
        for &threshold in &thresholds {
            if threshold <= Decimal::ZERO {
                return Err(BracketTableError::NonPositiveThreshold(threshold));
            }
            if threshold <= previous {
                return Err(BracketTableError::ThresholdsNotAscending {
                    previous,
                    current: threshold,
                });
            }
            previous = threshold;
        }

        if let Some(&rate) = rates.iter().find(|rate| **rate < Decimal::ZERO) {
            return Err(BracketTableError::NegativeRate(rate));
        }

        Ok(Self {
            thresholds,
            rates,
            reference_index,
        })
    }

    pub fn thresholds(&self) -> &[Decimal] {
        &self.thresholds
    }

    pub fn rates(&self) -> &[Decimal] {
        &self.rates
    }

    /// The year's social support index (IAS).
    pub fn reference_index(&self) -> Decimal {
        self.reference_index
    }
}
