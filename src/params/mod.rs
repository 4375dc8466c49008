//! Simulation parameters and scenario loading

mod data;
pub mod loader;

pub use data::{ParameterInputs, Parameters, MONTHS_PER_YEAR};
pub use loader::{load_inputs_json, load_scenarios, load_scenarios_from_reader, NamedParameters};
