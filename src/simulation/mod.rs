//! Monthly net worth simulation for the buy and rent strategies

mod state;
mod engine;
mod series;
pub mod estimate;
pub mod mortgage;

pub use state::{FinancialStatus, MonthlyBreakdown, Strategy};
pub use engine::{simulate, simulate_with_returns, AnnualReturns, ComparisonEngine, ReturnPath};
pub use series::{ComparisonResult, ComparisonSummary, MonthlySnapshot, StrategyResult};
pub use estimate::{equity_after_buying, equity_after_renting, MonthlyFinancials};
pub use mortgage::monthly_mortgage_payment;
