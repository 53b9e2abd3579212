use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income category of the declarant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Category A: regular employment.
    Employee,
    /// Category B: independent provision of services.
    Independent(IndependentActivity),
}

impl Category {
    pub fn activity(&self) -> Option<&IndependentActivity> {
        match self {
            Self::Employee => None,
            Self::Independent(activity) => Some(activity),
        }
    }
}

/// Business activity details of an independent worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndependentActivity {
    /// First day of the month the activity was registered.
    opened_at: NaiveDate,
    /// Declared business expenses for the year.
    expenses: Decimal,
}

impl IndependentActivity {
    /// Creates the activity from the month it was opened in.
    ///
    /// Returns `None` for an out-of-range month.
    pub fn new(
        opened_year: i32,
        opened_month: u32,
        expenses: Decimal,
    ) -> Option<Self> {
        let opened_at = NaiveDate::from_ymd_opt(opened_year, opened_month, 1)?;
        Some(Self {
            opened_at,
            expenses,
        })
    }

    /// Parses an opening month written as `mm/yy` or `mm/yyyy`.
    pub fn parse_opened_at(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        let padded = format!("01/{s}");
        let (year_digits, format) = match s.split_once('/') {
            Some((_, year)) if year.len() == 2 => (year, "%d/%m/%y"),
            Some((_, year)) if year.len() == 4 => (year, "%d/%m/%Y"),
            _ => return None,
        };
        if !year_digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        NaiveDate::parse_from_str(&padded, format).ok()
    }

    pub fn opened_at(&self) -> NaiveDate {
        self.opened_at
    }

    pub fn opened_year(&self) -> i32 {
        self.opened_at.year()
    }

    pub fn opened_month(&self) -> u32 {
        self.opened_at.month()
    }

    pub fn expenses(&self) -> Decimal {
        self.expenses
    }
}
