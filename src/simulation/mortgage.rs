//! Level-payment mortgage math

use crate::params::{Parameters, MONTHS_PER_YEAR};

/// Convert an annual rate to the equivalent monthly growth factor `(1 + r)^(1/12)`
pub fn monthly_growth_factor(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / MONTHS_PER_YEAR as f64)
}

/// Level payment that amortizes `principal` to zero over `periods` at
/// `periodic_rate`, paid at the end of each period
///
/// Returned as a positive outflow. With a zero rate this is `principal / periods`.
pub fn level_payment(periodic_rate: f64, periods: u32, principal: f64) -> f64 {
    let n = periods as f64;
    if periodic_rate == 0.0 {
        return principal / n;
    }
    principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powf(-n))
}

/// Monthly mortgage payment for the loan described by `params`
///
/// The monthly rate is the compounding equivalent of the annual rate, not
/// `annual / 12`.
pub fn monthly_mortgage_payment(params: &Parameters) -> f64 {
    let monthly_rate = monthly_growth_factor(params.mortgage_interest_rate()) - 1.0;
    level_payment(monthly_rate, params.num_months(), params.mortgage_principal())
}

/// Principal retired each month under the straight-line schedule used for
/// the outstanding mortgage balance
pub fn straight_line_principal(params: &Parameters) -> f64 {
    params.mortgage_principal() / params.num_months() as f64
}
