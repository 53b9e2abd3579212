use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use irs_cli::report::{self, OutputFormat};
use irs_cli::{app, config, utils};
use irs_core::{TaxProfileInput, ValidationError};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Portugal net income calculator.
///
/// Computes personal income tax, social security and solidarity tax for
/// one fiscal year and prints the net monthly salary.
#[derive(Debug, Parser)]
#[command(name = "irs", version)]
struct Cli {
    /// Gross annual income, e.g. `30000` or `30,000.00`.
    #[arg(value_name = "INCOME", value_parser = utils::parse_decimal)]
    income: Option<Decimal>,

    /// Fiscal year (2023 to 2025).
    #[arg(long)]
    year: Option<i32>,

    /// Taxed as a non-resident.
    #[arg(long, visible_alias = "nr", conflicts_with = "non_habitual")]
    non_resident: bool,

    /// Taxed under the non-habitual resident regime.
    #[arg(long, visible_alias = "nhr")]
    non_habitual: bool,

    /// Region of residence: Mainland, Madeira or Azores.
    #[arg(short, long)]
    region: Option<String>,

    /// Income category, `A` (employment) or `B` (independent services).
    #[arg(long)]
    category: Option<String>,

    /// Month the independent activity was opened, `mm/yy`. Implies category B.
    #[arg(long, value_name = "MM/YY")]
    opened_at: Option<String>,

    /// Expenses of the independent activity.
    #[arg(long, value_parser = utils::parse_decimal)]
    expenses: Option<Decimal>,

    /// Declaration status: single or joint.
    #[arg(long)]
    status: Option<String>,

    /// Comma separated ages of the dependents, e.g. `3,10`.
    #[arg(long, visible_alias = "kids", value_name = "AGES")]
    dependents: Option<String>,

    /// TOML file with profile defaults. Flags override its values.
    #[arg(long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// CSV file with bracket tables, replacing the embedded ones.
    #[arg(long, value_name = "PATH", env = "IRS_BRACKETS_FILE")]
    brackets: Option<PathBuf>,

    /// CSV file with the yearly reference index (IAS).
    #[arg(long, value_name = "PATH")]
    reference_index: Option<PathBuf>,

    /// Also compute the alternative scenarios.
    #[arg(long)]
    compare: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log every derived value to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn profile_input(&self) -> TaxProfileInput {
        let residence = if self.non_resident {
            Some("nr")
        } else if self.non_habitual {
            Some("nhr")
        } else {
            None
        };

        TaxProfileInput {
            year: self.year,
            income: self.income,
            residence: residence.map(str::to_string),
            region: self.region.clone(),
            category: self.category.clone(),
            activity_opened_at: self.opened_at.clone(),
            activity_expenses: self.expenses,
            marital_status: self.status.clone(),
            dependents: self.dependents.clone(),
        }
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `warn`, or `debug` with `--verbose`.
/// * Writes to stderr so the report on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_input = match &cli.profile {
        Some(path) => config::load_profile_file(path)?,
        None => TaxProfileInput::default(),
    };
    let input = config::overlay(file_input, cli.profile_input());
    debug!(?input, "profile input");

    let provider = app::load_provider(cli.brackets.as_deref(), cli.reference_index.as_deref())
        .context("failed to load bracket tables")?;

    let evaluation = match app::evaluate(&provider, input, cli.compare) {
        Err(err @ ValidationError::MissingBracketData { .. }) => {
            anyhow::bail!(
                "{err} (tables available: {})",
                app::available_tables(&provider)
            );
        }
        other => other?,
    };
    let output = report::render(&evaluation, cli.format).context("failed to render report")?;
    print!("{output}");
    if cli.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_flags_build_profile_input() {
        let cli = Cli::parse_from([
            "irs", "30,000", "--nhr", "-r", "Azores", "--kids", "3,10", "--status", "joint",
        ]);

        let input = cli.profile_input();

        assert_eq!(input.income, Some(dec!(30000)));
        assert_eq!(input.residence.as_deref(), Some("nhr"));
        assert_eq!(input.region.as_deref(), Some("Azores"));
        assert_eq!(input.dependents.as_deref(), Some("3,10"));
        assert_eq!(input.marital_status.as_deref(), Some("joint"));
        assert_eq!(input.year, None);
    }

    #[test]
    fn test_residence_flags_conflict() {
        let result = Cli::try_parse_from(["irs", "30000", "--nr", "--nhr"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_income_is_rejected() {
        assert!(Cli::try_parse_from(["irs", "lots"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["irs"]);

        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.compare);
        assert_eq!(cli.profile_input(), TaxProfileInput::default());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
