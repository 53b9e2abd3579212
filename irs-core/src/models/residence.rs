use std::fmt;

use serde::{Deserialize, Serialize};

/// Tax residence regime of the declarant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Residence {
    Resident,
    NonResident,
    NonHabitualResident,
}

impl Residence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "r",
            Self::NonResident => "nr",
            Self::NonHabitualResident => "nhr",
        }
    }

    /// Accepts the short codes (`r`, `nr`, `nhr`) and the spelled out names,
    /// ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "r" | "resident" => Some(Self::Resident),
            "nr" | "non-resident" | "nonresident" => Some(Self::NonResident),
            "nhr" | "non-habitual-resident" | "nonhabitualresident" => {
                Some(Self::NonHabitualResident)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Resident => "Resident",
            Self::NonResident => "Non-Resident",
            Self::NonHabitualResident => "Non-Habitual Resident",
        }
    }
}

impl fmt::Display for Residence {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Region of residence. Progressive rates differ between regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Mainland,
    Madeira,
    Azores,
}

impl Region {
    pub fn all() -> &'static [Region] {
        &[Region::Mainland, Region::Madeira, Region::Azores]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainland => "Mainland",
            Self::Madeira => "Madeira",
            Self::Azores => "Azores",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mainland" => Some(Self::Mainland),
            "madeira" => Some(Self::Madeira),
            "azores" => Some(Self::Azores),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
