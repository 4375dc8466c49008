//! Simulation parameter set and the user-facing inputs it is built from

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Months per simulated year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Raw simulation inputs as supplied by a user or a config file
///
/// Rates are fractions (0.065 for 6.5%). The annual base rent is not an input;
/// it is derived from the house value and the price-to-rent ratio when the
/// inputs are turned into [`Parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterInputs {
    /// Annual appreciation of the house, also the annual rent increase
    pub roi_real_estate: f64,

    /// Annual return of the stock market
    pub roi_stocks: f64,

    /// Nominal annual mortgage rate
    pub mortgage_interest_rate: f64,

    /// Insurance, property tax and maintenance as a fraction of house value per year
    pub base_house_misc_costs: f64,

    /// Fraction of the house price paid upfront
    pub downpayment_ratio: f64,

    /// House price in year 0
    pub base_house_equity: f64,

    /// House price divided by annual rent
    pub price_to_rent_ratio: f64,

    /// Simulation horizon in years
    pub num_years: u32,

    /// Household income per month
    pub monthly_income: f64,
}

impl Default for ParameterInputs {
    fn default() -> Self {
        Self {
            roi_real_estate: 0.065,
            roi_stocks: 0.1005, // S&P 500 with dividends reinvested, last 20 years
            mortgage_interest_rate: 0.06,
            base_house_misc_costs: 0.02,
            downpayment_ratio: 0.20,
            base_house_equity: 700_000.0,
            price_to_rent_ratio: 38.0, // San Jose, CA
            num_years: 20,
            monthly_income: 5_000.0,
        }
    }
}

/// Immutable parameter set shared by both strategy simulators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    roi_real_estate: f64,
    roi_stocks: f64,
    mortgage_interest_rate: f64,
    base_house_misc_costs: f64,
    downpayment_ratio: f64,
    base_house_equity: f64,
    price_to_rent_ratio: f64,
    base_rent_per_year: f64,
    num_years: u32,
    monthly_income: f64,
}

impl Parameters {
    /// Build a parameter set, deriving the annual base rent
    ///
    /// No validation happens here: a zero price-to-rent ratio yields a
    /// non-finite rent. Call [`Parameters::validate`] to reject such inputs.
    pub fn new(inputs: ParameterInputs) -> Self {
        Self {
            roi_real_estate: inputs.roi_real_estate,
            roi_stocks: inputs.roi_stocks,
            mortgage_interest_rate: inputs.mortgage_interest_rate,
            base_house_misc_costs: inputs.base_house_misc_costs,
            downpayment_ratio: inputs.downpayment_ratio,
            base_house_equity: inputs.base_house_equity,
            price_to_rent_ratio: inputs.price_to_rent_ratio,
            base_rent_per_year: inputs.base_house_equity / inputs.price_to_rent_ratio,
            num_years: inputs.num_years,
            monthly_income: inputs.monthly_income,
        }
    }

    /// Check the documented input domains
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("roi_real_estate", self.roi_real_estate),
            ("roi_stocks", self.roi_stocks),
            ("mortgage_interest_rate", self.mortgage_interest_rate),
            ("base_house_misc_costs", self.base_house_misc_costs),
            ("base_house_equity", self.base_house_equity),
            ("monthly_income", self.monthly_income),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {}", value)));
            }
        }

        if !(0.0..=1.0).contains(&self.downpayment_ratio) {
            return Err(invalid(
                "downpayment_ratio",
                format!("must be within [0, 1], got {}", self.downpayment_ratio),
            ));
        }
        let ratio = self.price_to_rent_ratio;
        if ratio.is_nan() || ratio.is_infinite() || ratio <= 0.0 {
            return Err(invalid(
                "price_to_rent_ratio",
                format!("must be positive, got {}", self.price_to_rent_ratio),
            ));
        }
        if self.num_years < 1 {
            return Err(invalid("num_years", "must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Inputs this parameter set was built from
    pub fn inputs(&self) -> ParameterInputs {
        ParameterInputs {
            roi_real_estate: self.roi_real_estate,
            roi_stocks: self.roi_stocks,
            mortgage_interest_rate: self.mortgage_interest_rate,
            base_house_misc_costs: self.base_house_misc_costs,
            downpayment_ratio: self.downpayment_ratio,
            base_house_equity: self.base_house_equity,
            price_to_rent_ratio: self.price_to_rent_ratio,
            num_years: self.num_years,
            monthly_income: self.monthly_income,
        }
    }

    pub fn roi_real_estate(&self) -> f64 {
        self.roi_real_estate
    }

    pub fn roi_stocks(&self) -> f64 {
        self.roi_stocks
    }

    pub fn mortgage_interest_rate(&self) -> f64 {
        self.mortgage_interest_rate
    }

    pub fn base_house_misc_costs(&self) -> f64 {
        self.base_house_misc_costs
    }

    pub fn downpayment_ratio(&self) -> f64 {
        self.downpayment_ratio
    }

    pub fn base_house_equity(&self) -> f64 {
        self.base_house_equity
    }

    pub fn price_to_rent_ratio(&self) -> f64 {
        self.price_to_rent_ratio
    }

    /// Annual rent in year 0, derived at construction
    pub fn base_rent_per_year(&self) -> f64 {
        self.base_rent_per_year
    }

    pub fn num_years(&self) -> u32 {
        self.num_years
    }

    pub fn monthly_income(&self) -> f64 {
        self.monthly_income
    }

    /// Amount borrowed at purchase
    pub fn mortgage_principal(&self) -> f64 {
        self.base_house_equity * (1.0 - self.downpayment_ratio)
    }

    /// Total number of monthly steps in the horizon
    pub fn num_months(&self) -> u32 {
        self.num_years * MONTHS_PER_YEAR
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(ParameterInputs::default())
    }
}

impl From<ParameterInputs> for Parameters {
    fn from(inputs: ParameterInputs) -> Self {
        Self::new(inputs)
    }
}

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidParameter { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_rent_derived_from_price_to_rent() {
        let params = Parameters::new(ParameterInputs {
            base_house_equity: 500_000.0,
            price_to_rent_ratio: 25.0,
            ..Default::default()
        });
        assert_relative_eq!(params.base_rent_per_year(), 20_000.0);
    }

    #[test]
    fn test_defaults_match_calculator_form() {
        let params = Parameters::default();
        assert_eq!(params.num_years(), 20);
        assert_eq!(params.num_months(), 240);
        assert_relative_eq!(params.base_rent_per_year(), 700_000.0 / 38.0);
        assert_relative_eq!(params.mortgage_principal(), 560_000.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_price_to_rent_is_unguarded_until_validated() {
        let params = Parameters::new(ParameterInputs {
            price_to_rent_ratio: 0.0,
            ..Default::default()
        });
        assert!(params.base_rent_per_year().is_infinite());

        match params.validate() {
            Err(Error::InvalidParameter { field, .. }) => assert_eq!(field, "price_to_rent_ratio"),
            other => panic!("expected price_to_rent_ratio error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_inputs() {
        let bad_downpayment = Parameters::new(ParameterInputs {
            downpayment_ratio: 1.5,
            ..Default::default()
        });
        assert!(matches!(
            bad_downpayment.validate(),
            Err(Error::InvalidParameter { field: "downpayment_ratio", .. })
        ));

        let zero_years = Parameters::new(ParameterInputs {
            num_years: 0,
            ..Default::default()
        });
        assert!(matches!(
            zero_years.validate(),
            Err(Error::InvalidParameter { field: "num_years", .. })
        ));

        let nan_rate = Parameters::new(ParameterInputs {
            roi_stocks: f64::NAN,
            ..Default::default()
        });
        assert!(matches!(
            nan_rate.validate(),
            Err(Error::InvalidParameter { field: "roi_stocks", .. })
        ));
    }

    #[test]
    fn test_inputs_round_trip_through_parameters() {
        let inputs = ParameterInputs {
            roi_stocks: 0.07,
            num_years: 30,
            ..Default::default()
        };
        assert_eq!(Parameters::new(inputs).inputs(), inputs);
    }
}
