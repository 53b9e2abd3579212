//! Profile files.
//!
//! A profile file is a TOML document whose keys mirror
//! [`TaxProfileInput`]. Every key is optional:
//!
//! ```toml
//! year = 2024
//! income = 42000
//! residence = "r"
//! region = "Madeira"
//! activity_opened_at = "03/23"
//! activity_expenses = 1500
//! marital_status = "joint"
//! dependents = "3,10"
//! ```
//!
//! Values given on the command line take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use irs_core::TaxProfileInput;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Reads a TOML profile file.
pub fn load_profile_file(path: &Path) -> Result<TaxProfileInput, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let input = parse_profile(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?input, "loaded profile file");
    Ok(input)
}

pub fn parse_profile(contents: &str) -> Result<TaxProfileInput, toml::de::Error> {
    toml::from_str(contents)
}

/// Layers `overrides` on top of `base`, field by field.
pub fn overlay(
    base: TaxProfileInput,
    overrides: TaxProfileInput,
) -> TaxProfileInput {
    TaxProfileInput {
        year: overrides.year.or(base.year),
        income: overrides.income.or(base.income),
        residence: overrides.residence.or(base.residence),
        region: overrides.region.or(base.region),
        category: overrides.category.or(base.category),
        activity_opened_at: overrides.activity_opened_at.or(base.activity_opened_at),
        activity_expenses: overrides.activity_expenses.or(base.activity_expenses),
        marital_status: overrides.marital_status.or(base.marital_status),
        dependents: overrides.dependents.or(base.dependents),
    }
}
