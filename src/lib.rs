//! Debt Spiral - month-by-month debt portfolio simulation for a single borrower
//!
//! This library provides:
//! - Loan classification by lender tier and repayment behavior
//! - A tiered multi-lender credit market (limits, rates, multi-lender penalties, toxic block)
//! - A monthly simulation engine that pays, matures, refinances and detects default
//! - Static maturity-wall analysis of a starting portfolio
//! - Scenario loading, parallel parameter sweeps and CSV export

pub mod error;
pub mod loan;
pub mod market;
pub mod simulation;
pub mod analysis;
pub mod scenario;
pub mod sweep;
pub mod report;

// Re-export commonly used types
pub use error::SimError;
pub use loan::{Loan, LoanRecord, LenderTier, RepaymentType};
pub use market::{Market, MarketConfig, Offer};
pub use simulation::{BorrowerProfile, Simulator, SimulationOutcome};
pub use scenario::Scenario;
