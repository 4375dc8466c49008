//! Rent or Own - monthly net worth simulation of buying a house versus renting
//!
//! This library provides:
//! - An immutable parameter set (rates, prices, horizon) with derived base rent
//! - Per-strategy financial status simulators advanced one month at a time
//! - Lockstep buy/rent comparisons sampled into net worth time series
//! - Closed-form yearly estimates and parallel scenario sweeps

pub mod error;
pub mod params;
pub mod simulation;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use params::{ParameterInputs, Parameters, MONTHS_PER_YEAR};
pub use simulation::{simulate, ComparisonResult, ComparisonSummary, FinancialStatus, Strategy};
pub use scenario::{ScenarioRunner, SweepField};
