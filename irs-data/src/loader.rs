use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use irs_core::{BracketTable, BracketTableError, BracketTableProvider, ProviderError, Region};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const BUILTIN_BRACKETS: &str = include_str!("../data/brackets.csv");
const BUILTIN_REFERENCE_INDEX: &str = include_str!("../data/reference_index.csv");

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("the last bracket for {year} in {region} must have an empty upper limit")]
    MissingOpenBracket { year: i32, region: Region },

    #[error("only the last bracket for {year} in {region} may have an empty upper limit")]
    OpenBracketNotLast { year: i32, region: Region },

    #[error("no reference index for {0}")]
    MissingReferenceIndex(i32),

    #[error("malformed bracket table for {year} in {region}: {source}")]
    Table {
        year: i32,
        region: Region,
        #[source]
        source: BracketTableError,
    },
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single bracket row from the brackets CSV file.
///
/// - `tax_year`: The fiscal year (e.g., 2025)
/// - `region`: `Mainland`, `Madeira` or `Azores`
/// - `upper_limit`: Upper bound of the bracket (empty for the top bracket)
/// - `rate`: The marginal rate as a decimal (e.g., 0.145 for 14.5%)
///
/// Rows of one (year, region) table must appear in ascending bracket order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub region: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

/// A row from the reference index (IAS) CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReferenceIndexRecord {
    pub tax_year: i32,
    pub reference_index: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables from CSV files.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse reference index records from a CSV reader.
    pub fn parse_reference_indices<R: Read>(
        reader: R
    ) -> Result<Vec<ReferenceIndexRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        csv_reader
            .deserialize()
            .map(|result| result.map_err(BracketTableLoaderError::from))
            .collect()
    }

    /// Assemble validated bracket tables.
    ///
    /// Records are grouped by (tax_year, region) keeping their file order.
    /// Every group needs exactly one open-ended bracket, in last position,
    /// and a reference index for its year.
    pub fn build(
        brackets: &[BracketRecord],
        indices: &[ReferenceIndexRecord],
    ) -> Result<StaticBracketProvider, BracketTableLoaderError> {
        let reference_index: BTreeMap<i32, Decimal> = indices
            .iter()
            .map(|record| (record.tax_year, record.reference_index))
            .collect();

        let mut groups: BTreeMap<(i32, Region), Vec<&BracketRecord>> = BTreeMap::new();
        for record in brackets {
            let region = Region::parse(&record.region)
                .ok_or_else(|| BracketTableLoaderError::InvalidRegion(record.region.clone()))?;
            groups
                .entry((record.tax_year, region))
                .or_default()
                .push(record);
        }

        let mut tables = BTreeMap::new();
        for ((year, region), rows) in groups {
            let Some((top, lower)) = rows.split_last() else {
                continue;
            };
            if top.upper_limit.is_some() {
                return Err(BracketTableLoaderError::MissingOpenBracket { year, region });
            }

            let thresholds = lower
                .iter()
                .map(|row| row.upper_limit)
                .collect::<Option<Vec<_>>>()
                .ok_or(BracketTableLoaderError::OpenBracketNotLast { year, region })?;
            let rates = rows.iter().map(|row| row.rate).collect();
            let index = *reference_index
                .get(&year)
                .ok_or(BracketTableLoaderError::MissingReferenceIndex(year))?;

            let table = BracketTable::new(thresholds, rates, index).map_err(|source| {
                warn!(year, %region, %source, "rejected bracket table");
                BracketTableLoaderError::Table {
                    year,
                    region,
                    source,
                }
            })?;
            debug!(year, %region, brackets = rows.len(), "loaded bracket table");
            tables.insert((year, region), table);
        }

        Ok(StaticBracketProvider { tables })
    }
}

/// In-memory [`BracketTableProvider`] populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticBracketProvider {
    tables: BTreeMap<(i32, Region), BracketTable>,
}

impl StaticBracketProvider {
    /// The 2023–2025 tables shipped with the crate.
    pub fn builtin() -> Result<Self, BracketTableLoaderError> {
        Self::from_readers(
            BUILTIN_BRACKETS.as_bytes(),
            BUILTIN_REFERENCE_INDEX.as_bytes(),
        )
    }

    pub fn from_readers<B: Read, I: Read>(
        brackets: B,
        reference_index: I,
    ) -> Result<Self, BracketTableLoaderError> {
        let brackets = BracketTableLoader::parse_brackets(brackets)?;
        let indices = BracketTableLoader::parse_reference_indices(reference_index)?;
        BracketTableLoader::build(&brackets, &indices)
    }

    /// Loads tables from a brackets file and a reference index file.
    pub fn from_paths(
        brackets: &Path,
        reference_index: &Path,
    ) -> Result<Self, BracketTableLoaderError> {
        Self::from_readers(open(brackets)?, open(reference_index)?)
    }

    /// Loads tables, falling back to the embedded data for any file not given.
    pub fn load(
        brackets: Option<&Path>,
        reference_index: Option<&Path>,
    ) -> Result<Self, BracketTableLoaderError> {
        let brackets: Box<dyn Read> = match brackets {
            Some(path) => Box::new(open(path)?),
            None => Box::new(BUILTIN_BRACKETS.as_bytes()),
        };
        let reference_index: Box<dyn Read> = match reference_index {
            Some(path) => Box::new(open(path)?),
            None => Box::new(BUILTIN_REFERENCE_INDEX.as_bytes()),
        };
        Self::from_readers(brackets, reference_index)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn open(path: &Path) -> Result<File, BracketTableLoaderError> {
    File::open(path).map_err(|source| BracketTableLoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl BracketTableProvider for StaticBracketProvider {
    fn bracket_table(
        &self,
        year: i32,
        region: Region,
    ) -> Result<&BracketTable, ProviderError> {
        self.tables
            .get(&(year, region))
            .ok_or(ProviderError::NotFound { year, region })
    }

    fn available(&self) -> Vec<(i32, Region)> {
        self.tables.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"tax_year,region,upper_limit,rate
2023,Mainland,7479,0.145
2023,Mainland,11284,0.21
2023,Mainland,,0.265
2023,Azores,7479,0.1015
2023,Azores,,0.147
"#;

    const TEST_INDEX: &str = "tax_year,reference_index\n2023,480.43\n";

    fn build(csv: &str) -> Result<StaticBracketProvider, BracketTableLoaderError> {
        StaticBracketProvider::from_readers(csv.as_bytes(), TEST_INDEX.as_bytes())
    }

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "tax_year,region,upper_limit,rate\n2023,Mainland,7479,0.145";

        let records = BracketTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                tax_year: 2023,
                region: "Mainland".to_string(),
                upper_limit: Some(dec!(7479)),
                rate: dec!(0.145),
            }]
        );
    }

    #[test]
    fn test_parse_csv_open_bracket() {
        let csv = "tax_year,region,upper_limit,rate\n2023,Mainland, ,0.48";

        let records = BracketTableLoader::parse_brackets(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_limit, None);
        assert_eq!(records[0].rate, dec!(0.48));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "tax_year,region\n2023,Mainland";

        let err = BracketTableLoader::parse_brackets(csv.as_bytes())
            .expect_err("Should fail for missing column");
        let BracketTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {msg}");
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "tax_year,region,upper_limit,rate\n2023,Mainland,abc,0.10";

        let result = BracketTableLoader::parse_brackets(csv.as_bytes());

        assert!(matches!(result, Err(BracketTableLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_reference_indices() {
        let records =
            BracketTableLoader::parse_reference_indices(TEST_INDEX.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![ReferenceIndexRecord {
                tax_year: 2023,
                reference_index: dec!(480.43),
            }]
        );
    }

    // =========================================================================
    // build tests
    // =========================================================================

    #[test]
    fn test_build_groups_by_year_and_region() {
        let provider = build(TEST_CSV).unwrap();

        let mainland = provider.bracket_table(2023, Region::Mainland).unwrap();
        let azores = provider.bracket_table(2023, Region::Azores).unwrap();

        assert_eq!(provider.len(), 2);
        assert_eq!(mainland.thresholds(), &[dec!(7479), dec!(11284)]);
        assert_eq!(mainland.rates(), &[dec!(0.145), dec!(0.21), dec!(0.265)]);
        assert_eq!(mainland.reference_index(), dec!(480.43));
        assert_eq!(azores.rates(), &[dec!(0.1015), dec!(0.147)]);
    }

    #[test]
    fn test_build_reports_missing_table() {
        let provider = build(TEST_CSV).unwrap();

        let result = provider.bracket_table(2024, Region::Madeira);

        assert_eq!(
            result,
            Err(ProviderError::NotFound {
                year: 2024,
                region: Region::Madeira,
            })
        );
    }

    #[test]
    fn test_build_rejects_unknown_region() {
        let csv = "tax_year,region,upper_limit,rate\n2023,Lisbon,,0.1";

        let result = build(csv);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::InvalidRegion(ref r)) if r == "Lisbon"
        ));
    }

    #[test]
    fn test_build_requires_open_top_bracket() {
        let csv = "tax_year,region,upper_limit,rate\n2023,Mainland,100,0.1\n2023,Mainland,200,0.2";

        let result = build(csv);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::MissingOpenBracket {
                year: 2023,
                region: Region::Mainland,
            })
        ));
    }

    #[test]
    fn test_build_rejects_open_bracket_in_the_middle() {
        let csv = "tax_year,region,upper_limit,rate\n2023,Mainland,,0.1\n2023,Mainland,,0.2";

        let result = build(csv);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::OpenBracketNotLast { .. })
        ));
    }

    #[test]
    fn test_build_requires_reference_index() {
        let csv = "tax_year,region,upper_limit,rate\n2024,Mainland,,0.1";

        let result = build(csv);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::MissingReferenceIndex(2024))
        ));
    }

    #[test]
    fn test_build_rejects_unsorted_thresholds() {
        let csv = "tax_year,region,upper_limit,rate\n\
                   2023,Mainland,200,0.1\n\
                   2023,Mainland,100,0.2\n\
                   2023,Mainland,,0.3";

        let result = build(csv);

        assert!(matches!(
            result,
            Err(BracketTableLoaderError::Table {
                source: BracketTableError::ThresholdsNotAscending { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_builtin_covers_every_supported_year_and_region() {
        let provider = StaticBracketProvider::builtin().unwrap();

        for year in irs_core::SUPPORTED_YEARS {
            for &region in Region::all() {
                let table = provider.bracket_table(year, region).unwrap();
                assert_eq!(table.thresholds().len(), 8, "{year} {region}");
                assert_eq!(table.rates().len(), 9, "{year} {region}");
            }
        }
    }
}
