//! CSV-backed bracket tables for the IRS engine.

mod loader;

pub use loader::{
    BracketRecord, BracketTableLoader, BracketTableLoaderError, ReferenceIndexRecord,
    StaticBracketProvider,
};
