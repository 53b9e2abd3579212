use serde::{Deserialize, Serialize};

use crate::models::{Region, Residence};

/// Income tax formula selected for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    /// Progressive brackets with family quotient and deductions.
    Resident,
    /// Flat rate on gross income.
    NonResident,
    /// Flat rate on the taxable base, reduced for Azores residents.
    NonHabitualResident { azores: bool },
}

impl Regime {
    pub fn select(
        residence: Residence,
        region: Region,
    ) -> Self {
        match residence {
            Residence::Resident => Self::Resident,
            Residence::NonResident => Self::NonResident,
            Residence::NonHabitualResident => Self::NonHabitualResident {
                azores: region == Region::Azores,
            },
        }
    }
}
