//! Rent or Own CLI
//!
//! Command-line interface for comparing buying a house against renting

use anyhow::{Context, Result};
use clap::Parser;
use rent_or_own::params::load_inputs_json;
use rent_or_own::simulation::{ComparisonEngine, FinancialStatus, MonthlyBreakdown, Strategy};
use rent_or_own::{ParameterInputs, Parameters};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rent_or_own")]
#[command(about = "Compare net worth over time when buying a house versus renting and investing")]
struct Args {
    /// JSON file with simulation inputs (fractions, not percentages); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// House value in the first year ($)
    #[arg(long)]
    house_value: Option<f64>,

    /// Monthly household income ($)
    #[arg(long)]
    monthly_income: Option<f64>,

    /// Price to annual rent ratio
    #[arg(long)]
    price_to_rent: Option<f64>,

    /// Annual stock market return (%)
    #[arg(long)]
    stock_return: Option<f64>,

    /// Number of years to simulate
    #[arg(long)]
    years: Option<u32>,

    /// Annual real estate return, also the yearly rent increase (%)
    #[arg(long)]
    real_estate_return: Option<f64>,

    /// Mortgage interest rate (%)
    #[arg(long)]
    mortgage_rate: Option<f64>,

    /// Downpayment (%)
    #[arg(long)]
    downpayment: Option<f64>,

    /// Insurance, property tax and maintenance (% of house value per year)
    #[arg(long)]
    misc_costs: Option<f64>,

    /// Write the monthly series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of the report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn inputs(&self) -> Result<ParameterInputs> {
        let mut inputs = match &self.config {
            Some(path) => load_inputs_json(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ParameterInputs::default(),
        };

        if let Some(v) = self.house_value {
            inputs.base_house_equity = v;
        }
        if let Some(v) = self.monthly_income {
            inputs.monthly_income = v;
        }
        if let Some(v) = self.price_to_rent {
            inputs.price_to_rent_ratio = v;
        }
        if let Some(v) = self.years {
            inputs.num_years = v;
        }
        if let Some(v) = self.stock_return {
            inputs.roi_stocks = 0.01 * v;
        }
        if let Some(v) = self.real_estate_return {
            inputs.roi_real_estate = 0.01 * v;
        }
        if let Some(v) = self.mortgage_rate {
            inputs.mortgage_interest_rate = 0.01 * v;
        }
        if let Some(v) = self.downpayment {
            inputs.downpayment_ratio = 0.01 * v;
        }
        if let Some(v) = self.misc_costs {
            inputs.base_house_misc_costs = 0.01 * v;
        }
        Ok(inputs)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = Parameters::new(args.inputs()?);
    params.validate().context("Invalid simulation inputs")?;

    let result = ComparisonEngine::new(params).run();

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
        result.write_csv(BufWriter::new(file))?;
        log::info!("Monthly series written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("To Rent or To Buy?");
    println!("==================\n");

    let buy = FinancialStatus::new(Strategy::Buy, &params);
    let rent = FinancialStatus::new(Strategy::Rent, &params);
    print_monthly_info("When Buying", &buy.breakdown());
    print_monthly_info("When Renting", &rent.breakdown());

    println!("\nNet worth by year:");
    println!("{:>5} {:>16} {:>16} {:>16}", "Year", "Buying", "Renting", "Difference");
    println!("{}", "-".repeat(56));
    for (b, r) in result.yearly() {
        println!(
            "{:>5} {:>16} {:>16} {:>16}",
            b.month / rent_or_own::MONTHS_PER_YEAR,
            format_amount(b.net_worth),
            format_amount(r.net_worth),
            format_amount(b.net_worth - r.net_worth),
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Months simulated: {}", summary.total_months);
    println!("  Final net worth (buying):  ${:.2}", summary.final_buy_net_worth);
    println!("  Final net worth (renting): ${:.2}", summary.final_rent_net_worth);
    println!("  Better strategy: {}", summary.better_strategy().label());
    match summary.breakeven_month {
        Some(month) => println!(
            "  Buying overtakes renting after {:.1} years",
            month as f64 / rent_or_own::MONTHS_PER_YEAR as f64
        ),
        None => println!("  Buying never overtakes renting"),
    }

    Ok(())
}

fn print_monthly_info(title: &str, info: &MonthlyBreakdown) {
    println!("{}", title);
    match info.mortgage_payment {
        Some(mortgage) => println!("  * Mortgage: ${:.2} / month", mortgage),
        None => println!("  * Monthly Rent: ${:.2} / month", info.monthly_expenses),
    }
    println!("  * Misc. Costs: ${:.2} / month", info.misc_costs);
    println!("  * Monthly Excess: ${:.2} / month", info.monthly_excess);
}

/// Chart-style amount: 1.2M above a million, 350K below
fn format_amount(x: f64) -> String {
    if x.abs() >= 1e6 {
        format!("{:.1}M", x / 1e6)
    } else {
        format!("{:.0}K", x / 1e3)
    }
}
