use std::fmt;

use serde::{Deserialize, Serialize};

/// How the household files its declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaritalStatus {
    /// Separate declaration. Dependents are assumed to be in shared custody.
    #[default]
    Single,
    /// Joint declaration of a married couple or civil partnership.
    Joint,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Joint => "joint",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(Self::Single),
            "joint" => Some(Self::Joint),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Joint => "Joint",
        }
    }

    /// The other declaration mode, used for what-if comparisons.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Single => Self::Joint,
            Self::Joint => Self::Single,
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
