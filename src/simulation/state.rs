//! Borrower profile

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Borrower cash profile, constant over the run apart from the reserve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    /// Monthly income (must be positive)
    pub income: f64,

    /// Fixed monthly living cost, senior to every debt payment
    #[serde(default)]
    pub living_cost: f64,

    /// Cash on hand at month 0
    #[serde(default)]
    pub initial_cash_reserve: f64,
}

impl BorrowerProfile {
    pub fn new(income: f64, living_cost: f64, initial_cash_reserve: f64) -> Self {
        Self { income, living_cost, initial_cash_reserve }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.income.is_finite() || self.income <= 0.0 {
            return Err(SimError::InvalidProfile { field: "income", value: self.income });
        }
        if !self.living_cost.is_finite() || self.living_cost < 0.0 {
            return Err(SimError::InvalidProfile { field: "living_cost", value: self.living_cost });
        }
        if !self.initial_cash_reserve.is_finite() || self.initial_cash_reserve < 0.0 {
            return Err(SimError::InvalidProfile {
                field: "initial_cash_reserve",
                value: self.initial_cash_reserve,
            });
        }
        Ok(())
    }
}
