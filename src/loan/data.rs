//! Loan account state

use serde::{Deserialize, Serialize};
use std::fmt;

use super::classify::{default_annual_rate, repayment_type_for_code, tier_for_org_code};

/// Risk/seniority class of a lender, safest and cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LenderTier {
    /// Banks
    T1,
    /// Consumer finance and other licensed non-banks
    T2,
    /// Microcredit and online lenders
    T3,
}

impl LenderTier {
    /// Borrowing order for new credit
    pub const ALL: [LenderTier; 3] = [LenderTier::T1, LenderTier::T2, LenderTier::T3];

    pub fn index(self) -> usize {
        match self {
            LenderTier::T1 => 0,
            LenderTier::T2 => 1,
            LenderTier::T3 => 2,
        }
    }

    /// Org code stamped on loans originated in this tier
    pub fn origination_org_code(self) -> u32 {
        match self {
            LenderTier::T1 => 11,
            LenderTier::T2 => 24,
            LenderTier::T3 => 51,
        }
    }
}

impl fmt::Display for LenderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LenderTier::T1 => "T1",
            LenderTier::T2 => "T2",
            LenderTier::T3 => "T3",
        };
        f.write_str(label)
    }
}

/// How the account's balance can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentType {
    /// Credit line that can be redrawn up to its limit
    Revolving,
    /// Installment loan; balance only changes at maturity
    Fixed,
}

/// A single credit account
///
/// `credit_limit`, `monthly_payment` and `annual_rate` are fixed at creation.
/// Only `balance` and `months_to_maturity` move during a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub name: String,
    pub org_code: u32,
    pub account_type_code: String,
    pub tier: LenderTier,
    pub repayment_type: RepaymentType,
    pub credit_limit: f64,
    pub balance: f64,
    pub monthly_payment: f64,
    pub months_to_maturity: i32,
    /// Nominal annual rate, already risk-adjusted
    pub annual_rate: f64,
}

impl Loan {
    /// Create a loan, classifying it from its codes
    ///
    /// A missing rate falls back to the tier default.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        org_code: u32,
        account_type_code: impl Into<String>,
        credit_limit: f64,
        balance: f64,
        monthly_payment: f64,
        months_to_maturity: i32,
        annual_rate: Option<f64>,
    ) -> Self {
        let account_type_code = account_type_code.into();
        let tier = tier_for_org_code(org_code);
        let repayment_type = repayment_type_for_code(&account_type_code);
        Self {
            name: name.into(),
            org_code,
            account_type_code,
            tier,
            repayment_type,
            credit_limit,
            balance,
            monthly_payment,
            months_to_maturity,
            annual_rate: annual_rate.unwrap_or_else(|| default_annual_rate(tier)),
        }
    }

    /// Holds outstanding principal
    pub fn is_active(&self) -> bool {
        self.balance > 0.0
    }

    /// Maturity countdown has run out; the account is closed to new draws
    pub fn is_matured(&self) -> bool {
        self.months_to_maturity <= 0
    }

    pub fn is_revolving(&self) -> bool {
        self.repayment_type == RepaymentType::Revolving
    }

    /// Undrawn amount on an open revolving line (zero otherwise)
    pub fn headroom(&self) -> f64 {
        if self.is_revolving() && !self.is_matured() {
            (self.credit_limit - self.balance).max(0.0)
        } else {
            0.0
        }
    }
}
