use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Region;

/// Errors raised while turning caller-supplied data into a [`TaxProfile`].
///
/// Every variant describes invalid input. None of them is transient, so
/// callers should report them rather than retry.
///
/// [`TaxProfile`]: crate::models::TaxProfile
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("only fiscal years from {min} to {max} are supported, got {year}")]
    UnsupportedYear { year: i32, min: i32, max: i32 },

    #[error("the annual gross income must be specified")]
    MissingIncome,

    #[error("the annual gross income must not be negative, got {0}")]
    InvalidIncome(Decimal),

    #[error("invalid type of residence '{0}', expected one of: r, nr, nhr")]
    InvalidResidence(String),

    #[error("invalid region of residence '{0}', expected one of: Mainland, Madeira, Azores")]
    InvalidRegion(String),

    #[error("invalid declaration status '{0}', expected either `single` or `joint`")]
    InvalidMaritalStatus(String),

    #[error("invalid income category '{0}', expected either `A` or `B`")]
    InvalidCategory(String),

    #[error("invalid activity opening date '{0}', expected a month in `mm/yy` format")]
    InvalidActivityDate(String),

    #[error("activity expenses must not be negative, got {0}")]
    InvalidActivityExpenses(Decimal),

    #[error(
        "taxes can't be estimated for {year}, the activity was only opened in {opened_year}; \
         consider a later year or adjust your income category"
    )]
    ActivityOpenedAfterFiscalYear { opened_year: i32, year: i32 },

    #[error(
        "invalid dependent ages '{0}', expected non-negative whole ages at the end of the year \
         separated by commas, e.g. `3,10,1`"
    )]
    InvalidDependentAges(String),

    #[error("no tax bracket data for {year} in {region}")]
    MissingBracketData { year: i32, region: Region },
}
