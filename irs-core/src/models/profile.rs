use std::fmt;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{
    Category, IndependentActivity, MaritalStatus, Region, Residence, TaxYearRules,
};

/// Fiscal year assumed when the input does not name one.
pub const DEFAULT_YEAR: i32 = 2023;

/// A validated income profile for one fiscal year.
///
/// Instances can only be obtained through [`TaxProfile::new`] or
/// [`TaxProfileInput::validate`], so every profile in circulation satisfies
/// the invariants below and computing taxes from it cannot fail:
/// - the year has a [`TaxYearRules`] entry
/// - gross income and activity expenses are not negative
/// - an independent activity was not opened after the fiscal year
/// - non-residents are always keyed to [`Region::Mainland`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxProfile {
    year: i32,
    gross_income: Decimal,
    residence: Residence,
    region: Region,
    category: Category,
    marital_status: MaritalStatus,
    dependent_ages: Vec<u32>,
    #[serde(skip)]
    rules: TaxYearRules,
}

impl TaxProfile {
    /// Creates a profile from typed values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the year is unsupported, the income or
    /// expenses are negative, or the activity opened after `year`.
    pub fn new(
        year: i32,
        gross_income: Decimal,
        residence: Residence,
        region: Region,
        category: Category,
        marital_status: MaritalStatus,
        dependent_ages: Vec<u32>,
    ) -> Result<Self, ValidationError> {
        let rules = TaxYearRules::for_year(year)?;

        if gross_income < Decimal::ZERO {
            return Err(ValidationError::InvalidIncome(gross_income));
        }

        if let Some(activity) = category.activity() {
            if activity.expenses() < Decimal::ZERO {
                return Err(ValidationError::InvalidActivityExpenses(activity.expenses()));
            }
            if activity.opened_year() > year {
                return Err(ValidationError::ActivityOpenedAfterFiscalYear {
                    opened_year: activity.opened_year(),
                    year,
                });
            }
        }

        Ok(Self {
            year,
            gross_income,
            residence,
            region: effective_region(residence, region),
            category,
            marital_status,
            dependent_ages,
            rules,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn gross_income(&self) -> Decimal {
        self.gross_income
    }

    pub fn residence(&self) -> Residence {
        self.residence
    }

    /// Region used for the bracket lookup.
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn marital_status(&self) -> MaritalStatus {
        self.marital_status
    }

    /// Ages of the dependents at the end of the year, in declaration order.
    pub fn dependent_ages(&self) -> &[u32] {
        &self.dependent_ages
    }

    pub fn has_dependents(&self) -> bool {
        !self.dependent_ages.is_empty()
    }

    pub fn rules(&self) -> &TaxYearRules {
        &self.rules
    }

    /// The same profile under another residence regime.
    pub fn with_residence(
        &self,
        residence: Residence,
        region: Region,
    ) -> Self {
        Self {
            residence,
            region: effective_region(residence, region),
            ..self.clone()
        }
    }

    /// The same profile filed with another declaration status.
    pub fn with_marital_status(
        &self,
        marital_status: MaritalStatus,
    ) -> Self {
        Self {
            marital_status,
            ..self.clone()
        }
    }

    /// The same profile with no dependents declared.
    pub fn without_dependents(&self) -> Self {
        Self {
            dependent_ages: Vec::new(),
            ..self.clone()
        }
    }
}

fn effective_region(
    residence: Residence,
    region: Region,
) -> Region {
    match residence {
        Residence::NonResident => Region::Mainland,
        Residence::Resident | Residence::NonHabitualResident => region,
    }
}

impl fmt::Display for TaxProfile {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "IRS for a {} living ", self.residence.label())?;
        match self.residence {
            Residence::NonResident => f.write_str("anywhere")?,
            _ => write!(f, "on {}", self.region)?,
        }
        let source = match self.category {
            Category::Employee => "regular employment",
            Category::Independent(_) => "independent provision of services",
        };
        write!(f, " from {source} in {}", self.year)
    }
}

/// Unvalidated profile fields as a form, flag set or profile file supplies them.
///
/// Missing fields fall back to the defaults of a single mainland resident
/// employee with no dependents in [`DEFAULT_YEAR`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxProfileInput {
    pub year: Option<i32>,
    pub income: Option<Decimal>,
    /// `r`, `nr` or `nhr`.
    pub residence: Option<String>,
    pub region: Option<String>,
    /// `A` or `B`. Inferred from `activity_opened_at` when absent.
    pub category: Option<String>,
    /// Month the independent activity was opened, `mm/yy`.
    pub activity_opened_at: Option<String>,
    pub activity_expenses: Option<Decimal>,
    /// `single` or `joint`.
    pub marital_status: Option<String>,
    /// Comma separated dependent ages, e.g. `3,10,1`.
    pub dependents: Option<String>,
}

impl TaxProfileInput {
    /// Validates every field and builds a [`TaxProfile`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<TaxProfile, ValidationError> {
        let year = self.year.unwrap_or(DEFAULT_YEAR);
        let gross_income = self.income.ok_or(ValidationError::MissingIncome)?;

        let residence = match self.residence.as_deref() {
            None => Residence::Resident,
            Some(s) => {
                Residence::parse(s).ok_or_else(|| ValidationError::InvalidResidence(s.to_string()))?
            }
        };
        let region = match self.region.as_deref() {
            None => Region::Mainland,
            Some(s) => Region::parse(s).ok_or_else(|| ValidationError::InvalidRegion(s.to_string()))?,
        };
        let marital_status = match self.marital_status.as_deref() {
            None => MaritalStatus::Single,
            Some(s) => MaritalStatus::parse(s)
                .ok_or_else(|| ValidationError::InvalidMaritalStatus(s.to_string()))?,
        };

        let category = self.parse_category()?;
        let dependent_ages = match self.dependents.as_deref() {
            None => Vec::new(),
            Some(s) => parse_dependent_ages(s)?,
        };

        TaxProfile::new(
            year,
            gross_income,
            residence,
            region,
            category,
            marital_status,
            dependent_ages,
        )
    }

    fn parse_category(&self) -> Result<Category, ValidationError> {
        let opened_at = self
            .activity_opened_at
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let independent = match self.category.as_deref().map(|c| c.trim().to_uppercase()) {
            None => opened_at.is_some(),
            Some(code) if code == "A" => false,
            Some(code) if code == "B" => true,
            Some(code) => return Err(ValidationError::InvalidCategory(code)),
        };

        if !independent {
            return Ok(Category::Employee);
        }

        let raw = opened_at.ok_or_else(|| ValidationError::InvalidActivityDate(String::new()))?;
        let date = IndependentActivity::parse_opened_at(raw)
            .ok_or_else(|| ValidationError::InvalidActivityDate(raw.to_string()))?;
        let expenses = self.activity_expenses.unwrap_or(Decimal::ZERO);

        IndependentActivity::new(date.year(), date.month(), expenses)
            .map(Category::Independent)
            .ok_or_else(|| ValidationError::InvalidActivityDate(raw.to_string()))
    }
}

/// Parses comma separated dependent ages. An empty string means no dependents.
pub fn parse_dependent_ages(s: &str) -> Result<Vec<u32>, ValidationError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|age| {
            age.trim()
                .parse::<u32>()
                .map_err(|_| ValidationError::InvalidDependentAges(s.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn employee_input(income: Decimal) -> TaxProfileInput {
        TaxProfileInput {
            income: Some(income),
            ..Default::default()
        }
    }

    // =========================================================================
    // TaxProfileInput::validate tests
    // =========================================================================

    #[test]
    fn validate_applies_defaults() {
        let profile = employee_input(dec!(30000)).validate().unwrap();

        assert_eq!(profile.year(), 2023);
        assert_eq!(profile.residence(), Residence::Resident);
        assert_eq!(profile.region(), Region::Mainland);
        assert_eq!(profile.category(), &Category::Employee);
        assert_eq!(profile.marital_status(), MaritalStatus::Single);
        assert!(!profile.has_dependents());
    }

    #[test]
    fn validate_requires_income() {
        let result = TaxProfileInput::default().validate();

        assert_eq!(result, Err(ValidationError::MissingIncome));
    }

    #[test]
    fn validate_rejects_negative_income() {
        let result = employee_input(dec!(-1)).validate();

        assert_eq!(result, Err(ValidationError::InvalidIncome(dec!(-1))));
    }

    #[test]
    fn validate_rejects_unsupported_year() {
        let input = TaxProfileInput {
            year: Some(2030),
            ..employee_input(dec!(1000))
        };

        assert!(matches!(
            input.validate(),
            Err(ValidationError::UnsupportedYear { year: 2030, .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_residence_region_and_status() {
        let bad_residence = TaxProfileInput {
            residence: Some("expat".to_string()),
            ..employee_input(dec!(1000))
        };
        let bad_region = TaxProfileInput {
            region: Some("Porto".to_string()),
            ..employee_input(dec!(1000))
        };
        let bad_status = TaxProfileInput {
            marital_status: Some("married".to_string()),
            ..employee_input(dec!(1000))
        };

        assert_eq!(
            bad_residence.validate(),
            Err(ValidationError::InvalidResidence("expat".to_string()))
        );
        assert_eq!(
            bad_region.validate(),
            Err(ValidationError::InvalidRegion("Porto".to_string()))
        );
        assert_eq!(
            bad_status.validate(),
            Err(ValidationError::InvalidMaritalStatus("married".to_string()))
        );
    }

    #[test]
    fn validate_forces_mainland_for_non_residents() {
        let input = TaxProfileInput {
            residence: Some("nr".to_string()),
            region: Some("Azores".to_string()),
            ..employee_input(dec!(1000))
        };

        let profile = input.validate().unwrap();

        assert_eq!(profile.region(), Region::Mainland);
    }

    #[test]
    fn validate_infers_category_b_from_opening_date() {
        let input = TaxProfileInput {
            activity_opened_at: Some("04/23".to_string()),
            activity_expenses: Some(dec!(250)),
            ..employee_input(dec!(20000))
        };

        let profile = input.validate().unwrap();
        let activity = profile.category().activity().unwrap();

        assert!(matches!(profile.category(), Category::Independent(_)));
        assert_eq!(activity.opened_year(), 2023);
        assert_eq!(activity.opened_month(), 4);
        assert_eq!(activity.expenses(), dec!(250));
    }

    #[test]
    fn validate_defaults_expenses_to_zero() {
        let input = TaxProfileInput {
            activity_opened_at: Some("01/22".to_string()),
            ..employee_input(dec!(20000))
        };

        let profile = input.validate().unwrap();

        assert_eq!(profile.category().activity().unwrap().expenses(), dec!(0));
    }

    #[test]
    fn validate_category_b_requires_opening_date() {
        let input = TaxProfileInput {
            category: Some("B".to_string()),
            ..employee_input(dec!(20000))
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::InvalidActivityDate(String::new()))
        );
    }

    #[test]
    fn validate_explicit_category_a_ignores_opening_date() {
        let input = TaxProfileInput {
            category: Some("a".to_string()),
            activity_opened_at: Some("garbage".to_string()),
            ..employee_input(dec!(20000))
        };

        assert_eq!(input.validate().unwrap().category(), &Category::Employee);
    }

    #[test]
    fn validate_rejects_unknown_category() {
        let input = TaxProfileInput {
            category: Some("C".to_string()),
            ..employee_input(dec!(20000))
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::InvalidCategory("C".to_string()))
        );
    }

    #[test]
    fn validate_rejects_malformed_opening_date() {
        let input = TaxProfileInput {
            activity_opened_at: Some("2023-04".to_string()),
            ..employee_input(dec!(20000))
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::InvalidActivityDate("2023-04".to_string()))
        );
    }

    #[test]
    fn validate_rejects_activity_opened_after_fiscal_year() {
        let input = TaxProfileInput {
            year: Some(2023),
            activity_opened_at: Some("02/24".to_string()),
            ..employee_input(dec!(20000))
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::ActivityOpenedAfterFiscalYear {
                opened_year: 2024,
                year: 2023,
            })
        );
    }

    #[test]
    fn validate_rejects_negative_expenses() {
        let input = TaxProfileInput {
            activity_opened_at: Some("02/23".to_string()),
            activity_expenses: Some(dec!(-5)),
            ..employee_input(dec!(20000))
        };

        assert_eq!(
            input.validate(),
            Err(ValidationError::InvalidActivityExpenses(dec!(-5)))
        );
    }

    #[test]
    fn validate_parses_dependent_ages() {
        let input = TaxProfileInput {
            dependents: Some("3, 10,1".to_string()),
            ..employee_input(dec!(20000))
        };

        assert_eq!(input.validate().unwrap().dependent_ages(), &[3, 10, 1]);
    }

    // =========================================================================
    // parse_dependent_ages tests
    // =========================================================================

    #[test]
    fn parse_dependent_ages_empty_means_none() {
        assert_eq!(parse_dependent_ages(""), Ok(vec![]));
        assert_eq!(parse_dependent_ages("  "), Ok(vec![]));
    }

    #[test]
    fn parse_dependent_ages_rejects_negative_and_fractional() {
        for raw in ["3,-1", "2.5", "3,,4", "three"] {
            assert_eq!(
                parse_dependent_ages(raw),
                Err(ValidationError::InvalidDependentAges(raw.to_string())),
                "accepted {raw}"
            );
        }
    }

    // =========================================================================
    // variants and display
    // =========================================================================

    #[test]
    fn with_residence_renormalizes_region() {
        let input = TaxProfileInput {
            region: Some("Madeira".to_string()),
            ..employee_input(dec!(1000))
        };
        let profile = input.validate().unwrap();

        let non_resident = profile.with_residence(Residence::NonResident, Region::Azores);
        let nhr = profile.with_residence(Residence::NonHabitualResident, Region::Azores);

        assert_eq!(non_resident.region(), Region::Mainland);
        assert_eq!(nhr.region(), Region::Azores);
        assert_eq!(nhr.gross_income(), dec!(1000));
    }

    #[test]
    fn without_dependents_clears_ages() {
        let input = TaxProfileInput {
            dependents: Some("1,2".to_string()),
            ..employee_input(dec!(1000))
        };
        let profile = input.validate().unwrap();

        assert!(!profile.without_dependents().has_dependents());
        assert!(profile.has_dependents());
    }

    #[test]
    fn display_describes_resident_employee() {
        let profile = employee_input(dec!(30000)).validate().unwrap();

        assert_eq!(
            profile.to_string(),
            "IRS for a Resident living on Mainland from regular employment in 2023"
        );
    }

    #[test]
    fn display_describes_non_resident_independent_worker() {
        let input = TaxProfileInput {
            year: Some(2024),
            residence: Some("nr".to_string()),
            activity_opened_at: Some("06/23".to_string()),
            ..employee_input(dec!(30000))
        };

        assert_eq!(
            input.validate().unwrap().to_string(),
            "IRS for a Non-Resident living anywhere from independent provision of services in 2024"
        );
    }
}
