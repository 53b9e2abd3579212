//! Tax calculation pipeline for Portuguese personal income tax.
//!
//! Each module derives one component of the liability; [`engine`] wires
//! them together.

pub mod common;
pub mod engine;
pub mod family;
pub mod progressive;
pub mod social_security;
pub mod solidarity;
pub mod taxable_base;

pub use engine::{IncomeTaxEngine, compute, compute_with_provider};
pub use family::{FamilyAllowance, family_deduction, family_quotient};
pub use progressive::progressive_tax;
pub use social_security::{AccrualSchedule, social_security_tax};
pub use solidarity::solidarity_tax;
pub use taxable_base::{specific_deduction, taxable_base};
