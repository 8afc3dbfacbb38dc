//! Structured simulation output: event log entries and monthly snapshots

use serde::{Deserialize, Serialize};

use crate::loan::{LenderTier, Loan};

/// Coarse grouping of log entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Outflow,
    Shock,
    Income,
    Savings,
    Warning,
    GapFill,
    NewCredit,
    Rejection,
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    LivingCost,
    ScheduledPayments,
    MaturedPrincipal,
    Salary,
    Deposit,
    CashGap,
    ReserveDrawn,
    RevolvingDraw,
    LoanOriginated,
    ApplicationRejected,
    Default,
}

impl EventKind {
    pub fn category(self) -> EventCategory {
        match self {
            EventKind::LivingCost | EventKind::ScheduledPayments => EventCategory::Outflow,
            EventKind::MaturedPrincipal => EventCategory::Shock,
            EventKind::Salary => EventCategory::Income,
            EventKind::Deposit => EventCategory::Savings,
            EventKind::CashGap | EventKind::Default => EventCategory::Warning,
            EventKind::ReserveDrawn | EventKind::RevolvingDraw => EventCategory::GapFill,
            EventKind::LoanOriginated => EventCategory::NewCredit,
            EventKind::ApplicationRejected => EventCategory::Rejection,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::LivingCost => "living cost",
            EventKind::ScheduledPayments => "scheduled payments",
            EventKind::MaturedPrincipal => "principal matured",
            EventKind::Salary => "salary",
            EventKind::Deposit => "deposit",
            EventKind::CashGap => "cash gap",
            EventKind::ReserveDrawn => "reserve drawn",
            EventKind::RevolvingDraw => "revolving draw",
            EventKind::LoanOriginated => "loan originated",
            EventKind::ApplicationRejected => "application rejected",
            EventKind::Default => "default",
        }
    }
}

/// One append-only log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub month: u32,
    pub category: EventCategory,
    pub event: EventKind,
    /// Signed cash effect; outflows are negative
    pub cash_delta: f64,
    pub detail: String,
}

impl EventLogEntry {
    pub fn new(month: u32, event: EventKind, cash_delta: f64, detail: impl Into<String>) -> Self {
        Self {
            month,
            category: event.category(),
            event,
            cash_delta,
            detail: detail.into(),
        }
    }

    pub fn event_name(&self) -> &'static str {
        self.event.name()
    }
}

/// Outstanding debt per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierAmounts {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
}

impl TierAmounts {
    pub fn from_loans(loans: &[Loan]) -> Self {
        let mut amounts = Self::default();
        for loan in loans {
            *amounts.get_mut(loan.tier) += loan.balance;
        }
        amounts
    }

    pub fn get(&self, tier: LenderTier) -> f64 {
        match tier {
            LenderTier::T1 => self.t1,
            LenderTier::T2 => self.t2,
            LenderTier::T3 => self.t3,
        }
    }

    fn get_mut(&mut self, tier: LenderTier) -> &mut f64 {
        match tier {
            LenderTier::T1 => &mut self.t1,
            LenderTier::T2 => &mut self.t2,
            LenderTier::T3 => &mut self.t3,
        }
    }

    pub fn total(&self) -> f64 {
        self.t1 + self.t2 + self.t3
    }
}

/// End-of-month aggregate state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    pub month: u32,
    pub debt_by_tier: TierAmounts,
    pub total_debt: f64,
    pub cash_reserve: f64,
    /// Gap left after every resolution stage
    pub unmet_gap: f64,
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub is_dead: bool,
    pub death_month: Option<u32>,
    pub death_reason: Option<String>,
    pub months_simulated: u32,
    pub final_total_debt: f64,
    pub final_cash_reserve: f64,
    pub history: Vec<MonthSnapshot>,
    pub log: Vec<EventLogEntry>,
}

impl SimulationOutcome {
    pub fn survived(&self) -> bool {
        !self.is_dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_carries_category() {
        let entry = EventLogEntry::new(3, EventKind::LoanOriginated, 5_000.0, "T2");
        assert_eq!(entry.category, EventCategory::NewCredit);
        assert_eq!(entry.event_name(), "loan originated");
    }

    #[test]
    fn test_tier_amounts() {
        let loans = vec![
            Loan::new("bank", 11, "R1", 10_000.0, 4_000.0, 100.0, 6, None),
            Loan::new("bank2", 15, "D1", 10_000.0, 1_000.0, 100.0, 6, None),
            Loan::new("micro", 51, "D1", 5_000.0, 2_500.0, 100.0, 6, None),
        ];
        let amounts = TierAmounts::from_loans(&loans);
        assert_eq!(amounts.get(LenderTier::T1), 5_000.0);
        assert_eq!(amounts.get(LenderTier::T2), 0.0);
        assert_eq!(amounts.get(LenderTier::T3), 2_500.0);
        assert_eq!(amounts.total(), 7_500.0);
    }
}
