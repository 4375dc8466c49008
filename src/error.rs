//! Error types for the simulation library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or loading simulations
#[derive(Error, Debug)]
pub enum Error {
    /// Strategy tag is neither Buy nor Rent
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// A parameter is outside its allowed domain
    #[error("Invalid parameter: {field} - {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
