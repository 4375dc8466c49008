//! Scenario runner for batch and what-if comparisons
//!
//! Each comparison owns its simulators, so scenarios run in parallel with no
//! shared mutable state.

use rayon::prelude::*;
use serde::Serialize;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::params::{NamedParameters, ParameterInputs, Parameters};
use crate::simulation::{ComparisonEngine, ComparisonResult, ComparisonSummary, ReturnPath};

/// Input that a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepField {
    RoiRealEstate,
    RoiStocks,
    MortgageInterestRate,
    BaseHouseMiscCosts,
    DownpaymentRatio,
    BaseHouseEquity,
    PriceToRentRatio,
    MonthlyIncome,
}

impl SweepField {
    fn apply(&self, inputs: &mut ParameterInputs, value: f64) {
        match self {
            SweepField::RoiRealEstate => inputs.roi_real_estate = value,
            SweepField::RoiStocks => inputs.roi_stocks = value,
            SweepField::MortgageInterestRate => inputs.mortgage_interest_rate = value,
            SweepField::BaseHouseMiscCosts => inputs.base_house_misc_costs = value,
            SweepField::DownpaymentRatio => inputs.downpayment_ratio = value,
            SweepField::BaseHouseEquity => inputs.base_house_equity = value,
            SweepField::PriceToRentRatio => inputs.price_to_rent_ratio = value,
            SweepField::MonthlyIncome => inputs.monthly_income = value,
        }
    }
}

impl FromStr for SweepField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "roi_real_estate" => Ok(SweepField::RoiRealEstate),
            "roi_stocks" => Ok(SweepField::RoiStocks),
            "mortgage_interest_rate" => Ok(SweepField::MortgageInterestRate),
            "base_house_misc_costs" => Ok(SweepField::BaseHouseMiscCosts),
            "downpayment_ratio" => Ok(SweepField::DownpaymentRatio),
            "base_house_equity" => Ok(SweepField::BaseHouseEquity),
            "price_to_rent_ratio" => Ok(SweepField::PriceToRentRatio),
            "monthly_income" => Ok(SweepField::MonthlyIncome),
            other => Err(Error::InvalidParameter {
                field: "sweep",
                reason: format!("unknown field {}", other),
            }),
        }
    }
}

/// Summary of one named scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub summary: ComparisonSummary,
}

/// Runs comparisons derived from a base parameter set
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: Parameters,
}

impl ScenarioRunner {
    pub fn new(base: Parameters) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Parameters {
        &self.base
    }

    /// Run the base scenario with its default returns
    pub fn run(&self) -> ComparisonResult {
        ComparisonEngine::new(self.base).run()
    }

    /// Run the base scenario once per return path
    pub fn run_return_paths(&self, paths: &[ReturnPath]) -> Vec<ComparisonResult> {
        paths
            .par_iter()
            .map(|path| ComparisonEngine::new(self.base).with_returns(path.clone()).run())
            .collect()
    }

    /// Vary one input over `values`, keeping everything else at the base
    ///
    /// Every swept parameter set is validated before any simulation runs.
    pub fn sweep(&self, field: SweepField, values: &[f64]) -> Result<Vec<(f64, ComparisonSummary)>> {
        log::info!("Sweeping {:?} over {} values", field, values.len());
        let swept = values
            .iter()
            .map(|&value| {
                let mut inputs = self.base.inputs();
                field.apply(&mut inputs, value);
                let params = Parameters::new(inputs);
                params.validate()?;
                Ok((value, params))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(swept
            .par_iter()
            .map(|(value, params)| (*value, ComparisonEngine::new(*params).run().summary()))
            .collect())
    }

    /// Run independent named scenarios in parallel, preserving input order
    pub fn run_batch(scenarios: &[NamedParameters]) -> Vec<ScenarioOutcome> {
        log::info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                summary: ComparisonEngine::new(scenario.params).run().summary(),
            })
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}
