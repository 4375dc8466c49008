//! Closed-form, year-granular estimates of the two strategies
//!
//! These ignore monthly compounding and income and work from year-0 costs,
//! so they only approximate the monthly simulation. Useful as a quick
//! sanity check and for callers that only need a handful of points.

use serde::Serialize;

use super::mortgage::monthly_mortgage_payment;
use crate::params::{Parameters, MONTHS_PER_YEAR};

/// Monthly figures at the time of purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyFinancials {
    pub mortgage: f64,
    pub rent: f64,
    pub misc_costs: f64,
}

impl MonthlyFinancials {
    pub fn at_purchase(params: &Parameters) -> Self {
        let months = MONTHS_PER_YEAR as f64;
        Self {
            mortgage: monthly_mortgage_payment(params),
            rent: params.base_house_equity() / params.price_to_rent_ratio() / months,
            misc_costs: params.base_house_misc_costs() * params.base_house_equity() / months,
        }
    }
}

/// House value after annual compounding, less every mortgage payment and
/// misc cost paid so far
pub fn equity_after_buying(years: f64, params: &Parameters) -> f64 {
    let value_of_house = params.base_house_equity() * (1.0 + params.roi_real_estate()).powf(years);
    let total_mortgage_payments = monthly_mortgage_payment(params) * years * MONTHS_PER_YEAR as f64;
    let total_misc_costs = params.base_house_misc_costs() * params.base_house_equity() * years;
    value_of_house - total_mortgage_payments - total_misc_costs
}

/// Stock portfolio after investing what buying would have cost, less rent
///
/// Each year's excess (annual ownership cost minus that year's rent) is
/// compounded at the stock return for the remaining years. Year 0 also
/// invests the downpayment.
pub fn equity_after_renting(years: u32, params: &Parameters) -> f64 {
    let annual_savings_by_not_buying = monthly_mortgage_payment(params) * MONTHS_PER_YEAR as f64
        + params.base_house_misc_costs() * params.base_house_equity();

    (0..=years)
        .map(|year| {
            let rent = params.base_rent_per_year() * (1.0 + params.roi_real_estate()).powi(year as i32);
            let mut excess = annual_savings_by_not_buying - rent;
            if year == 0 {
                excess += params.downpayment_ratio() * params.base_house_equity();
            }
            excess * (1.0 + params.roi_stocks()).powi((years - year) as i32)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterInputs;
    use approx::assert_relative_eq;

    fn no_growth() -> Parameters {
        Parameters::new(ParameterInputs {
            roi_real_estate: 0.0,
            roi_stocks: 0.0,
            mortgage_interest_rate: 0.0,
            base_house_misc_costs: 0.0,
            downpayment_ratio: 0.2,
            base_house_equity: 500_000.0,
            price_to_rent_ratio: 25.0,
            num_years: 30,
            monthly_income: 0.0,
        })
    }

    #[test]
    fn test_monthly_financials_at_purchase() {
        let params = Parameters::new(ParameterInputs {
            base_house_misc_costs: 0.024,
            ..no_growth().inputs()
        });
        let financials = MonthlyFinancials::at_purchase(&params);

        assert_relative_eq!(financials.mortgage, 400_000.0 / 360.0);
        assert_relative_eq!(financials.rent, 20_000.0 / 12.0);
        assert_relative_eq!(financials.misc_costs, 1_000.0);
    }

    #[test]
    fn test_equity_after_buying_at_start_is_house_value() {
        let params = Parameters::default();
        assert_relative_eq!(equity_after_buying(0.0, &params), params.base_house_equity());
    }

    #[test]
    fn test_equity_after_buying_without_growth() {
        let params = no_growth();
        // Ten years of straight payments against an unchanged house value
        let expected = 500_000.0 - 400_000.0 / 360.0 * 120.0;
        assert_relative_eq!(equity_after_buying(10.0, &params), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_equity_after_renting_at_start() {
        let params = no_growth();
        // Downpayment plus one year of mortgage savings minus one year of rent
        let expected = 100_000.0 + 400_000.0 / 30.0 - 20_000.0;
        assert_relative_eq!(equity_after_renting(0, &params), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_equity_after_renting_compounds_early_years_most() {
        let params = Parameters::new(ParameterInputs {
            roi_stocks: 0.10,
            ..no_growth().inputs()
        });
        let one_year = equity_after_renting(1, &params);
        let annual_excess = 400_000.0 / 30.0 - 20_000.0;
        let expected = (100_000.0 + annual_excess) * 1.1 + annual_excess;
        assert_relative_eq!(one_year, expected, max_relative = 1e-12);
    }
}
