//! Error types for simulation setup and I/O

use thiserror::Error;

/// Errors raised by the simulation engine and its loaders
///
/// Running out of cash is not an error: it is the modeled default state
/// reported by [`crate::simulation::Simulator::is_dead`].
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid borrower profile: {field} = {value}")]
    InvalidProfile { field: &'static str, value: f64 },

    #[error("invalid loan '{name}': {reason}")]
    InvalidLoan { name: String, reason: String },

    #[error("invalid market configuration: {0}")]
    InvalidMarket(String),

    #[error("simulation already defaulted in month {month}; it cannot be advanced")]
    AdvanceAfterDefault { month: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
