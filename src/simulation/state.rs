//! Balance sheet of one housing strategy, advanced month by month

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::mortgage::{monthly_growth_factor, monthly_mortgage_payment, straight_line_principal};
use super::series::MonthlySnapshot;
use crate::error::{Error, Result};
use crate::params::{Parameters, MONTHS_PER_YEAR};

/// The housing decision being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Rent the house and invest the downpayment and any monthly excess
    Rent,
    /// Buy the house with a downpayment and a mortgage
    Buy,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Rent => "Renting",
            Strategy::Buy => "Buying",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rent => write!(f, "rent"),
            Strategy::Buy => write!(f, "buy"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rent" => Ok(Strategy::Rent),
            "buy" => Ok(Strategy::Buy),
            _ => Err(Error::InvalidStrategy(s.to_string())),
        }
    }
}

/// Numeric codes used by saved calculator sessions: 1 = rent, 2 = buy
impl TryFrom<u8> for Strategy {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Strategy::Rent),
            2 => Ok(Strategy::Buy),
            other => Err(Error::InvalidStrategy(other.to_string())),
        }
    }
}

/// Strategy-specific holdings. Only an owner carries a house and a loan.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Holding {
    Own {
        equity_real_estate: f64,
        remaining_mortgage_equity: f64,
    },
    Rent,
}

/// Derived monthly cash-flow figures for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyBreakdown {
    /// Level mortgage payment, only when buying
    pub mortgage_payment: Option<f64>,
    /// Insurance, tax and maintenance on the latest taxable house value
    pub misc_costs: f64,
    /// Total housing outflow (mortgage + misc, or rent)
    pub monthly_expenses: f64,
    /// Income left after expenses
    pub monthly_excess: f64,
}

/// Financial status of one strategy at a point in simulated time
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatus {
    params: Parameters,
    holding: Holding,
    equity_stocks: f64,
    latest_taxable_house_value: f64,
    monthly_expenses: f64,
    cumulative_real_estate_roi: f64,
    elapsed_months: u32,
}

impl FinancialStatus {
    /// Initialize starting balances and first-month expenses for `strategy`
    pub fn new(strategy: Strategy, params: &Parameters) -> Self {
        let mut status = Self {
            params: *params,
            holding: Holding::Rent,
            equity_stocks: 0.0,
            latest_taxable_house_value: 0.0,
            monthly_expenses: 0.0,
            cumulative_real_estate_roi: 1.0,
            elapsed_months: 0,
        };

        match strategy {
            Strategy::Buy => {
                status.holding = Holding::Own {
                    equity_real_estate: params.base_house_equity(),
                    remaining_mortgage_equity: params.mortgage_principal(),
                };
                status.latest_taxable_house_value = params.base_house_equity();
                status.monthly_expenses =
                    monthly_mortgage_payment(params) + status.monthly_misc_costs();
            }
            Strategy::Rent => {
                // The money not spent on a downpayment is invested right away
                status.equity_stocks = params.base_house_equity() * params.downpayment_ratio();
                status.monthly_expenses = params.base_rent_per_year() / MONTHS_PER_YEAR as f64;
            }
        }

        status
    }

    /// Build a status from a textual strategy tag such as `"buy"` or `"rent"`
    pub fn from_tag(tag: &str, params: &Parameters) -> Result<Self> {
        let strategy = tag.parse::<Strategy>()?;
        Ok(Self::new(strategy, params))
    }

    /// Strategy fixed at construction
    pub fn strategy(&self) -> Strategy {
        match self.holding {
            Holding::Own { .. } => Strategy::Buy,
            Holding::Rent => Strategy::Rent,
        }
    }

    /// Parameter set this status was built from
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Current house value, zero when renting
    pub fn equity_real_estate(&self) -> f64 {
        match self.holding {
            Holding::Own { equity_real_estate, .. } => equity_real_estate,
            Holding::Rent => 0.0,
        }
    }

    /// Outstanding mortgage principal, zero when renting
    pub fn remaining_mortgage_equity(&self) -> f64 {
        match self.holding {
            Holding::Own { remaining_mortgage_equity, .. } => remaining_mortgage_equity,
            Holding::Rent => 0.0,
        }
    }

    /// Value of the stock portfolio
    pub fn equity_stocks(&self) -> f64 {
        self.equity_stocks
    }

    /// House value as of the last annual re-evaluation
    pub fn latest_taxable_house_value(&self) -> f64 {
        self.latest_taxable_house_value
    }

    /// Housing outflow fixed at the last annual re-evaluation
    pub fn monthly_expenses(&self) -> f64 {
        self.monthly_expenses
    }

    /// Household income per month
    pub fn monthly_income(&self) -> f64 {
        self.params.monthly_income()
    }

    /// Product of every monthly real-estate growth factor applied so far
    pub fn cumulative_real_estate_roi(&self) -> f64 {
        self.cumulative_real_estate_roi
    }

    /// Months advanced since construction
    pub fn elapsed_months(&self) -> u32 {
        self.elapsed_months
    }

    /// Elapsed months as fractional years
    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_months as f64 / MONTHS_PER_YEAR as f64
    }

    /// Level mortgage payment for the configured loan
    pub fn monthly_mortgage_payment(&self) -> f64 {
        monthly_mortgage_payment(&self.params)
    }

    /// Insurance, tax and maintenance on the latest taxable house value
    pub fn monthly_misc_costs(&self) -> f64 {
        self.params.base_house_misc_costs() * self.latest_taxable_house_value / MONTHS_PER_YEAR as f64
    }

    /// Cash left to invest this month; negative values are drawn from stocks
    pub fn monthly_excess(&self) -> f64 {
        self.params.monthly_income() - self.monthly_expenses
    }

    /// House value plus stocks minus outstanding mortgage
    pub fn net_worth(&self) -> f64 {
        self.equity_real_estate() + self.equity_stocks - self.remaining_mortgage_equity()
    }

    /// Advance one month using the parameter set's default returns
    pub fn advance_month(&mut self) {
        self.advance_month_with(self.params.roi_stocks(), self.params.roi_real_estate());
    }

    /// Advance one month with explicit annual returns for this step
    pub fn advance_month_with(&mut self, roi_stocks: f64, roi_real_estate: f64) {
        self.elapsed_months += 1;

        let stocks_growth = monthly_growth_factor(roi_stocks);
        let real_estate_growth = monthly_growth_factor(roi_real_estate);

        self.equity_stocks *= stocks_growth;
        self.cumulative_real_estate_roi *= real_estate_growth;
        self.equity_stocks += self.monthly_excess();

        if let Holding::Own {
            equity_real_estate,
            remaining_mortgage_equity,
        } = &mut self.holding
        {
            *equity_real_estate *= real_estate_growth;
            // Straight-line paydown, independent of the interest actually paid
            *remaining_mortgage_equity -= straight_line_principal(&self.params);
        }

        if self.elapsed_months % MONTHS_PER_YEAR == 0 {
            self.annual_reevaluation();
        }
    }

    /// Refresh house value, rent and ownership costs at a year boundary
    fn annual_reevaluation(&mut self) {
        self.latest_taxable_house_value =
            self.params.base_house_equity() * self.cumulative_real_estate_roi;

        self.monthly_expenses = match self.holding {
            Holding::Own { .. } => self.monthly_mortgage_payment() + self.monthly_misc_costs(),
            Holding::Rent => {
                self.params.base_rent_per_year() * self.cumulative_real_estate_roi
                    / MONTHS_PER_YEAR as f64
            }
        };

        log::trace!(
            "{} year {}: taxable value {:.2}, monthly expenses {:.2}",
            self.strategy(),
            self.elapsed_months / MONTHS_PER_YEAR,
            self.latest_taxable_house_value,
            self.monthly_expenses,
        );
    }

    /// Current balances as a series sample
    pub fn snapshot(&self) -> MonthlySnapshot {
        MonthlySnapshot {
            month: self.elapsed_months,
            years: self.elapsed_years(),
            net_worth: self.net_worth(),
            equity_real_estate: self.equity_real_estate(),
            equity_stocks: self.equity_stocks,
            remaining_mortgage_equity: self.remaining_mortgage_equity(),
            monthly_expenses: self.monthly_expenses,
        }
    }

    /// Monthly cash-flow figures for display
    pub fn breakdown(&self) -> MonthlyBreakdown {
        MonthlyBreakdown {
            mortgage_payment: match self.holding {
                Holding::Own { .. } => Some(self.monthly_mortgage_payment()),
                Holding::Rent => None,
            },
            misc_costs: self.monthly_misc_costs(),
            monthly_expenses: self.monthly_expenses,
            monthly_excess: self.monthly_excess(),
        }
    }

    /// Log the summary block at debug level
    pub fn log_summary(&self) {
        log::debug!("{}", self);
    }
}

impl fmt::Display for FinancialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[SUMMARY]")?;
        writeln!(f, "strategy: {}, monthly income: {:.2}", self.strategy(), self.monthly_income())?;
        writeln!(
            f,
            "real estate: {:.2}, stocks: {:.2}",
            self.equity_real_estate(),
            self.equity_stocks
        )?;
        writeln!(
            f,
            "remaining mortgage: {:.2}, monthly expense: {:.2}",
            self.remaining_mortgage_equity(),
            self.monthly_expenses
        )?;
        write!(f, "cumulative real estate roi: {:.6}", self.cumulative_real_estate_roi)
    }
}
