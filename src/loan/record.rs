//! Loan input records and boundary validation
//!
//! Records arrive from whatever import layer feeds the engine. Amounts that are
//! negative or non-finite are clamped to zero here, so the simulator only ever
//! sees well-formed loans.

use log::warn;
use serde::{Deserialize, Serialize};

use super::Loan;

/// One loan as supplied by an import layer or scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub name: String,

    /// Lender org code; unknown codes are classified as T3
    #[serde(default = "default_org_code")]
    pub lender_org_code: u32,

    /// Account-type code (R1/R2/R4 revolving, D1/R3 fixed); unknown codes are fixed
    #[serde(default)]
    pub account_type_code: String,

    #[serde(default)]
    pub credit_limit: f64,

    #[serde(default)]
    pub balance: f64,

    #[serde(default)]
    pub monthly_payment: f64,

    #[serde(default = "default_maturity")]
    pub months_to_maturity: i32,

    /// Nominal annual rate; tier default when omitted
    #[serde(default)]
    pub annual_rate: Option<f64>,
}

fn default_org_code() -> u32 { 99 }
fn default_maturity() -> i32 { 12 }

impl LoanRecord {
    /// Convert to a [`Loan`], clamping bad amounts to zero
    pub fn to_loan(&self) -> Loan {
        let credit_limit = clamp_amount(&self.name, "credit_limit", self.credit_limit);
        let balance = clamp_amount(&self.name, "balance", self.balance);
        let monthly_payment = clamp_amount(&self.name, "monthly_payment", self.monthly_payment);
        let annual_rate = match self.annual_rate {
            Some(rate) if rate.is_finite() && rate >= 0.0 => Some(rate),
            Some(rate) => {
                warn!("loan '{}': annual_rate {} is invalid, using tier default", self.name, rate);
                None
            }
            None => None,
        };

        Loan::new(
            self.name.clone(),
            self.lender_org_code,
            self.account_type_code.clone(),
            credit_limit,
            balance,
            monthly_payment,
            self.months_to_maturity,
            annual_rate,
        )
    }
}

fn clamp_amount(name: &str, field: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("loan '{}': {} = {} clamped to 0", name, field, value);
        0.0
    }
}

/// Build a fresh, independently owned portfolio from records
pub fn loans_from_records(records: &[LoanRecord]) -> Vec<Loan> {
    records.iter().map(LoanRecord::to_loan).collect()
}
