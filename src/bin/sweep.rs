//! Run many buy/rent comparisons at once
//!
//! Either loads named scenarios from a CSV file, or sweeps one input of the
//! default parameter set over a list of values. Outputs one summary row per
//! scenario.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rent_or_own::params::load_scenarios;
use rent_or_own::scenario::ScenarioOutcome;
use rent_or_own::{ComparisonSummary, Parameters, ScenarioRunner, SweepField};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Batch buy-versus-rent comparisons")]
struct Args {
    /// CSV file with one named scenario per row
    #[arg(long, conflicts_with = "field")]
    scenarios: Option<PathBuf>,

    /// Input to vary on the default parameters, e.g. roi_stocks
    #[arg(long, requires = "values")]
    field: Option<String>,

    /// Comma-separated values for the swept input (fractions)
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,

    /// Write summaries to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Flat summary row for CSV output
#[derive(Debug, Serialize)]
struct OutputRow {
    name: String,
    total_months: u32,
    final_buy_net_worth: f64,
    final_rent_net_worth: f64,
    buy_advantage: f64,
    breakeven_month: Option<u32>,
}

impl OutputRow {
    fn new(name: String, summary: &ComparisonSummary) -> Self {
        Self {
            name,
            total_months: summary.total_months,
            final_buy_net_worth: summary.final_buy_net_worth,
            final_rent_net_worth: summary.final_rent_net_worth,
            buy_advantage: summary.buy_advantage,
            breakeven_month: summary.breakeven_month,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let rows: Vec<OutputRow> = if let Some(path) = &args.scenarios {
        let scenarios = load_scenarios(path)
            .with_context(|| format!("Failed to load scenarios from {}", path.display()))?;
        println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

        ScenarioRunner::run_batch(&scenarios)
            .into_iter()
            .map(|ScenarioOutcome { name, summary }| OutputRow::new(name, &summary))
            .collect()
    } else if let Some(field) = &args.field {
        let sweep_field: SweepField = field.parse()?;
        let runner = ScenarioRunner::new(Parameters::default());
        runner
            .sweep(sweep_field, &args.values)
            .with_context(|| format!("Invalid value for {}", field))?
            .into_iter()
            .map(|(value, summary)| OutputRow::new(format!("{}={}", field, value), &summary))
            .collect()
    } else {
        bail!("Pass either --scenarios <csv> or --field <name> --values <list>");
    };

    println!(
        "{:<28} {:>16} {:>16} {:>16} {:>10}",
        "Scenario", "Buy", "Rent", "Advantage", "Breakeven"
    );
    println!("{}", "-".repeat(90));
    for row in &rows {
        let breakeven = row
            .breakeven_month
            .map(|m| format!("{:.1}y", m as f64 / rent_or_own::MONTHS_PER_YEAR as f64))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<28} {:>16.2} {:>16.2} {:>16.2} {:>10}",
            row.name, row.final_buy_net_worth, row.final_rent_net_worth, row.buy_advantage, breakeven
        );
    }

    if let Some(path) = &args.output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("\nOutput written to {}", path.display());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
