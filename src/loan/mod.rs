//! Loan data structures, classification tables and input records

mod data;
pub mod classify;
pub mod record;

pub use data::{Loan, LenderTier, RepaymentType};
pub use classify::{tier_for_org_code, repayment_type_for_code, default_annual_rate, lender_type_name};
pub use record::{LoanRecord, loans_from_records};
