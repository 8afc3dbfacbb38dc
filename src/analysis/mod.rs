//! Static stress analysis of an initial portfolio
//!
//! The maturity wall shows how much principal falls due in each future month
//! if nothing is refinanced, against the borrower's monthly income.

use serde::{Deserialize, Serialize};

use crate::loan::Loan;

/// Principal falling due in one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaturityBucket {
    pub month: u32,
    pub principal_due: f64,
    /// Principal due alone is larger than a month of income
    pub exceeds_income: bool,
}

/// Principal due per month over a horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityWall {
    pub income: f64,
    pub buckets: Vec<MaturityBucket>,
}

impl MaturityWall {
    /// Month with the largest principal due (earliest on ties)
    pub fn peak(&self) -> Option<&MaturityBucket> {
        self.buckets
            .iter()
            .filter(|b| b.principal_due > 0.0)
            .fold(None, |best: Option<&MaturityBucket>, b| match best {
                Some(current) if current.principal_due >= b.principal_due => Some(current),
                _ => Some(b),
            })
    }

    /// Months where principal due exceeds income
    pub fn breach_months(&self) -> Vec<u32> {
        self.buckets
            .iter()
            .filter(|b| b.exceeds_income)
            .map(|b| b.month)
            .collect()
    }

    pub fn total_due(&self) -> f64 {
        self.buckets.iter().map(|b| b.principal_due).sum()
    }
}

/// Bucket every active loan's balance by its maturity month
///
/// Countdowns at or below zero land in month 1, where the first step settles
/// them. Loans maturing beyond the horizon are left out.
pub fn maturity_wall(loans: &[Loan], income: f64, horizon: u32) -> MaturityWall {
    let mut due = vec![0.0; horizon as usize];
    for loan in loans.iter().filter(|l| l.is_active()) {
        let month = loan.months_to_maturity.max(1) as usize;
        if month <= due.len() {
            due[month - 1] += loan.balance;
        }
    }

    let buckets = due
        .into_iter()
        .enumerate()
        .map(|(idx, principal_due)| MaturityBucket {
            month: idx as u32 + 1,
            principal_due,
            exceeds_income: principal_due > income,
        })
        .collect();

    MaturityWall { income, buckets }
}
