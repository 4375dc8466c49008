//! Lockstep buy-versus-rent simulation

use serde::{Deserialize, Serialize};

use super::series::ComparisonResult;
use super::state::{FinancialStatus, Strategy};
use crate::params::{Parameters, MONTHS_PER_YEAR};

/// Annual returns for one simulated year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualReturns {
    pub roi_stocks: f64,
    pub roi_real_estate: f64,
}

/// Year-by-year returns overriding the parameter defaults
///
/// Years past the end of the path use the parameter set's returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnPath {
    years: Vec<AnnualReturns>,
}

impl ReturnPath {
    pub fn new(years: Vec<AnnualReturns>) -> Self {
        Self { years }
    }

    /// Returns for 0-indexed `year`, if the path covers it
    pub fn for_year(&self, year: u32) -> Option<AnnualReturns> {
        self.years.get(year as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Runs one buy and one rent simulator over the parameter horizon
pub struct ComparisonEngine {
    params: Parameters,
    returns: Option<ReturnPath>,
}

impl ComparisonEngine {
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            returns: None,
        }
    }

    /// Use per-year returns instead of the parameter defaults
    pub fn with_returns(mut self, returns: ReturnPath) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Sample both net worths before each monthly step, for `num_years * 12` steps
    pub fn run(&self) -> ComparisonResult {
        let months = self.params.num_months();
        log::debug!(
            "Simulating {} months: house {:.0}, rent {:.0}/year",
            months,
            self.params.base_house_equity(),
            self.params.base_rent_per_year(),
        );

        let mut result = ComparisonResult::new();
        let mut buy = FinancialStatus::new(Strategy::Buy, &self.params);
        let mut rent = FinancialStatus::new(Strategy::Rent, &self.params);

        for month in 0..months {
            result.buy.add_sample(buy.snapshot());
            result.rent.add_sample(rent.snapshot());

            match self.returns_for_month(month) {
                Some(r) => {
                    buy.advance_month_with(r.roi_stocks, r.roi_real_estate);
                    rent.advance_month_with(r.roi_stocks, r.roi_real_estate);
                }
                None => {
                    buy.advance_month();
                    rent.advance_month();
                }
            }
        }

        buy.log_summary();
        rent.log_summary();
        result
    }

    fn returns_for_month(&self, month: u32) -> Option<AnnualReturns> {
        self.returns
            .as_ref()
            .and_then(|path| path.for_year(month / MONTHS_PER_YEAR))
    }
}

/// Simulate both strategies with the parameter set's default returns
pub fn simulate(params: &Parameters) -> ComparisonResult {
    ComparisonEngine::new(*params).run()
}

/// Simulate both strategies following a year-by-year return path
pub fn simulate_with_returns(params: &Parameters, returns: &ReturnPath) -> ComparisonResult {
    ComparisonEngine::new(*params).with_returns(returns.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterInputs;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn test_params() -> Parameters {
        Parameters::new(ParameterInputs {
            roi_real_estate: 0.05,
            roi_stocks: 0.07,
            mortgage_interest_rate: 0.04,
            base_house_misc_costs: 0.02,
            downpayment_ratio: 0.2,
            base_house_equity: 500_000.0,
            price_to_rent_ratio: 25.0,
            num_years: 30,
            monthly_income: 8_000.0,
        })
    }

    #[test]
    fn test_simulation_samples_every_month() {
        let params = test_params();
        let result = simulate(&params);

        assert_eq!(result.len(), 360);
        assert_eq!(result.rent.samples.len(), 360);
        assert_eq!(result.buy.samples[0].month, 0);
        assert_eq!(result.buy.samples[359].month, 359);
        assert_relative_eq!(result.buy.samples[18].years, 1.5);
    }

    #[test]
    fn test_first_sample_is_before_any_step() {
        let params = test_params();
        let result = simulate(&params);

        assert_relative_eq!(result.buy.samples[0].net_worth, 100_000.0);
        assert_relative_eq!(result.rent.samples[0].net_worth, 100_000.0);
        assert_relative_eq!(result.buy.samples[0].remaining_mortgage_equity, 400_000.0);
    }

    #[test]
    fn test_matches_manual_lockstep() {
        let params = test_params();
        let result = simulate(&params);

        let mut buy = FinancialStatus::new(Strategy::Buy, &params);
        for sample in &result.buy.samples {
            assert_eq!(sample.net_worth, buy.net_worth());
            buy.advance_month();
        }
    }

    #[test]
    fn test_yearly_samples() {
        let params = test_params();
        let result = simulate(&params);
        let years: Vec<u32> = result.yearly().map(|(b, _)| b.month).collect();
        assert_eq!(years.len(), 30);
        assert_eq!(years[1], 12);
    }

    #[test]
    fn test_return_path_overrides_defaults() {
        let params = test_params();
        let flat = ReturnPath::new(vec![
            AnnualReturns {
                roi_stocks: 0.0,
                roi_real_estate: 0.0,
            };
            2
        ]);
        let result = simulate_with_returns(&params, &flat);

        // No growth during the first year: house value stays put
        assert_abs_diff_eq!(result.buy.samples[12].equity_real_estate, 500_000.0, epsilon = 1e-9);
        assert_eq!(result.rent.samples[12].monthly_expenses, result.rent.samples[0].monthly_expenses);

        // Year three falls back to the default 5% appreciation
        let year_two = result.buy.samples[24].equity_real_estate;
        let year_three = result.buy.samples[36].equity_real_estate;
        assert_relative_eq!(year_three / year_two, 1.05, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_return_path_matches_defaults() {
        let params = test_params();
        assert_eq!(simulate_with_returns(&params, &ReturnPath::default()), simulate(&params));
    }

    #[test]
    fn test_breakeven_with_inexact_downpayment() {
        // 123457 * 0.7 and 123457 * 0.3 leave a rounding gap at month 0
        let params = Parameters::new(ParameterInputs {
            base_house_equity: 123_457.0,
            downpayment_ratio: 0.3,
            roi_real_estate: 0.15,
            roi_stocks: 0.0,
            monthly_income: 1_000_000.0,
            ..Default::default()
        });
        let summary = simulate(&params).summary();

        assert!(summary.buy_advantage > 0.0);
        assert_eq!(summary.better_strategy(), Strategy::Buy);
        assert_eq!(summary.breakeven_month, Some(1));
    }

    #[test]
    fn test_higher_stock_returns_favor_renting() {
        let low = Parameters::new(ParameterInputs {
            roi_stocks: 0.03,
            ..test_params().inputs()
        });
        let high = Parameters::new(ParameterInputs {
            roi_stocks: 0.12,
            ..test_params().inputs()
        });

        let low_summary = simulate(&low).summary();
        let high_summary = simulate(&high).summary();
        assert!(high_summary.final_rent_net_worth > low_summary.final_rent_net_worth);
        assert!(high_summary.buy_advantage < low_summary.buy_advantage);
    }
}
