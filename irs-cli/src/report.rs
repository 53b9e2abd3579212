//! Report rendering for the command line.

use std::fmt::Write;

use serde::Serialize;

use crate::app::Evaluation;
use crate::scenarios::Alternative;
use crate::utils::{format_amount, format_percent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    description: String,
    profile: &'a irs_core::TaxProfile,
    result: &'a irs_core::TaxResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternatives: Option<&'a [Alternative]>,
}

pub fn render(
    evaluation: &Evaluation,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(evaluation)),
        OutputFormat::Json => render_json(evaluation),
    }
}

/// Plain text summary, one amount per line right-aligned in euros.
pub fn render_text(evaluation: &Evaluation) -> String {
    let result = &evaluation.result;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n{}\n", evaluation.profile);
    let _ = writeln!(out, "Wages:{:>30}€", format_amount(result.wages));
    let _ = writeln!(
        out,
        "\nPersonal Income Tax:{:>15}€",
        format_amount(result.income_tax)
    );
    let _ = writeln!(
        out,
        "Social Security:{:>19}€",
        format_amount(result.social_security_tax)
    );
    if result.solidarity_tax > rust_decimal::Decimal::ZERO {
        let _ = writeln!(
            out,
            "Solidarity Tax:{:>20}€",
            format_amount(result.solidarity_tax)
        );
    }
    let _ = writeln!(out, "\nTotal Tax:{:>25}€", format_amount(result.total_tax));
    let _ = writeln!(
        out,
        "Effective Rate:{:>21}",
        format_percent(result.effective_rate)
    );
    let _ = writeln!(
        out,
        "\nMonthly Net Salary:{:>16}€",
        format_amount(result.monthly_net)
    );

    if let Some(alternatives) = &evaluation.alternatives {
        out.push_str(&render_alternatives(alternatives));
    }

    out
}

fn render_alternatives(alternatives: &[Alternative]) -> String {
    let mut out = String::new();
    if alternatives.is_empty() {
        let _ = writeln!(out, "\nNo alternative scenarios available.");
        return out;
    }

    let _ = writeln!(
        out,
        "\n{:<24}{:>16}{:>16}{:>14}",
        "Scenario", "Total Tax", "Monthly Net", "Gain"
    );
    for alt in alternatives {
        let _ = writeln!(
            out,
            "{:<24}{:>15}€{:>15}€{:>13}€",
            alt.description,
            format_amount(alt.total_tax),
            format_amount(alt.monthly_net),
            format_amount(alt.gain)
        );
    }
    out
}

pub fn render_json(evaluation: &Evaluation) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        description: evaluation.profile.to_string(),
        profile: &evaluation.profile,
        result: &evaluation.result,
        alternatives: evaluation.alternatives.as_deref(),
    };
    serde_json::to_string_pretty(&report)
}
