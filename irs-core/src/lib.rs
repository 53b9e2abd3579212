//! Portuguese personal income tax (IRS) computation.
//!
//! The crate is purely computational: it validates a [`TaxProfile`], takes a
//! [`BracketTable`] for the profile's year and region, and derives a
//! [`TaxResult`]. Bracket data is supplied by a [`BracketTableProvider`]
//! implemented elsewhere.

pub mod calculations;
pub mod error;
pub mod models;
pub mod provider;

pub use calculations::{IncomeTaxEngine, compute, compute_with_provider};
pub use error::ValidationError;
pub use models::*;
pub use provider::{BracketTableProvider, ProviderError};
