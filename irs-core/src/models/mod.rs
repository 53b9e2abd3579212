mod bracket_table;
mod category;
mod household;
mod profile;
mod regime;
mod residence;
mod tax_result;
mod tax_year_rules;

pub use bracket_table::{BracketTable, BracketTableError};
pub use category::{Category, IndependentActivity};
pub use household::MaritalStatus;
pub use profile::{DEFAULT_YEAR, TaxProfile, TaxProfileInput, parse_dependent_ages};
pub use regime::Regime;
pub use residence::{Region, Residence};
pub use tax_result::TaxResult;
pub use tax_year_rules::{SUPPORTED_YEARS, SpecificDeduction, TaxYearRules};
