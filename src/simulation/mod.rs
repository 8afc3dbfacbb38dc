//! Monthly debt-spiral simulation engine

mod state;
mod events;
mod engine;

pub use state::BorrowerProfile;
pub use events::{EventCategory, EventKind, EventLogEntry, MonthSnapshot, TierAmounts, SimulationOutcome};
pub use engine::Simulator;

// ============================================================================
// Gap resolution and origination constants
// ============================================================================

/// Residual gap treated as fully covered
pub const GAP_TOLERANCE: f64 = 1.0;

/// Scheduled monthly payment of a newly originated loan, as a share of the drawn amount (3%)
pub const NEW_LOAN_PAYMENT_RATIO: f64 = 0.03;

/// Term of a newly originated loan
pub const NEW_LOAN_TERM_MONTHS: i32 = 12;

/// Account-type code of a newly originated loan (revolving)
pub const NEW_LOAN_ACCOUNT_TYPE: &str = "R1";
