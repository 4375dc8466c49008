//! Net worth time series produced by a comparison run

use serde::{Deserialize, Serialize};
use std::io::Write;

use super::state::Strategy;
use crate::error::Result;
use crate::params::MONTHS_PER_YEAR;

/// Balances of one strategy sampled at the start of a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Months elapsed since the start (0-indexed)
    pub month: u32,
    /// Elapsed time in years
    pub years: f64,
    pub net_worth: f64,
    pub equity_real_estate: f64,
    pub equity_stocks: f64,
    pub remaining_mortgage_equity: f64,
    pub monthly_expenses: f64,
}

/// Sampled series for one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub samples: Vec<MonthlySnapshot>,
}

impl StrategyResult {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            samples: Vec::new(),
        }
    }

    pub fn add_sample(&mut self, sample: MonthlySnapshot) {
        self.samples.push(sample);
    }

    /// `(elapsed_years, net_worth)` pairs, the series a chart would plot
    pub fn net_worth_series(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.years, s.net_worth)).collect()
    }

    pub fn final_net_worth(&self) -> f64 {
        self.samples.last().map(|s| s.net_worth).unwrap_or(0.0)
    }
}

/// Buy and rent series sampled in lockstep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub buy: StrategyResult,
    pub rent: StrategyResult,
}

/// One line of CSV output: both strategies at the same month
#[derive(Debug, Serialize)]
struct CsvRow {
    month: u32,
    years: f64,
    buy_net_worth: f64,
    rent_net_worth: f64,
    buy_equity_real_estate: f64,
    buy_equity_stocks: f64,
    buy_remaining_mortgage: f64,
    buy_monthly_expenses: f64,
    rent_equity_stocks: f64,
    rent_monthly_expenses: f64,
}

impl ComparisonResult {
    pub fn new() -> Self {
        Self {
            buy: StrategyResult::new(Strategy::Buy),
            rent: StrategyResult::new(Strategy::Rent),
        }
    }

    pub fn len(&self) -> usize {
        self.buy.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.samples.is_empty()
    }

    pub fn get(&self, strategy: Strategy) -> &StrategyResult {
        match strategy {
            Strategy::Buy => &self.buy,
            Strategy::Rent => &self.rent,
        }
    }

    /// Samples taken at each whole year boundary
    pub fn yearly(&self) -> impl Iterator<Item = (&MonthlySnapshot, &MonthlySnapshot)> {
        self.buy
            .samples
            .iter()
            .zip(self.rent.samples.iter())
            .filter(|(buy, _)| buy.month % MONTHS_PER_YEAR == 0)
    }

    pub fn summary(&self) -> ComparisonSummary {
        let final_buy = self.buy.final_net_worth();
        let final_rent = self.rent.final_net_worth();

        // First month buying pulls ahead after trailing or tying
        let mut breakeven_month = None;
        let mut trailing = false;
        for (buy, rent) in self.buy.samples.iter().zip(self.rent.samples.iter()) {
            if buy_leads(buy.net_worth, rent.net_worth) {
                if trailing {
                    breakeven_month = Some(buy.month);
                    break;
                }
            } else {
                trailing = true;
            }
        }

        ComparisonSummary {
            total_months: self.len() as u32,
            final_buy_net_worth: final_buy,
            final_rent_net_worth: final_rent,
            buy_advantage: final_buy - final_rent,
            breakeven_month,
        }
    }

    /// Write the month-by-month series as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (buy, rent) in self.buy.samples.iter().zip(self.rent.samples.iter()) {
            csv_writer.serialize(CsvRow {
                month: buy.month,
                years: buy.years,
                buy_net_worth: buy.net_worth,
                rent_net_worth: rent.net_worth,
                buy_equity_real_estate: buy.equity_real_estate,
                buy_equity_stocks: buy.equity_stocks,
                buy_remaining_mortgage: buy.remaining_mortgage_equity,
                buy_monthly_expenses: buy.monthly_expenses,
                rent_equity_stocks: rent.equity_stocks,
                rent_monthly_expenses: rent.monthly_expenses,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Relative tolerance below which two net worths count as tied
const NET_WORTH_TIE_TOLERANCE: f64 = 1e-9;

/// Whether buying is ahead by more than rounding noise
///
/// Both strategies start from the same capital, but `house * (1 - dp)` and
/// `house * dp` rarely cancel exactly in floating point.
fn buy_leads(buy: f64, rent: f64) -> bool {
    buy - rent > NET_WORTH_TIE_TOLERANCE * rent.abs().max(1.0)
}

impl Default for ComparisonResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_months: u32,
    pub final_buy_net_worth: f64,
    pub final_rent_net_worth: f64,
    /// Final buy net worth minus final rent net worth
    pub buy_advantage: f64,
    /// First sampled month where buying overtakes renting
    pub breakeven_month: Option<u32>,
}

impl ComparisonSummary {
    pub fn better_strategy(&self) -> Strategy {
        if self.buy_advantage > 0.0 {
            Strategy::Buy
        } else {
            Strategy::Rent
        }
    }
}
