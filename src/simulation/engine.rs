//! Simulator: advances the borrower's cash and loan portfolio one month at a time
//!
//! Each month runs the same fixed sequence: living cost, scheduled payments,
//! maturity payoffs, net flow, then either a deposit or gap resolution
//! (reserve -> revolving draws -> new borrowing T1 -> T2 -> T3). A gap that is
//! still above [`GAP_TOLERANCE`] after every stage puts the borrower into the
//! terminal default state.

use log::{debug, info};

use crate::error::{Result, SimError};
use crate::loan::{LenderTier, Loan};
use crate::market::{ActiveCounts, Market, OfferDecision};

use super::{
    BorrowerProfile, EventKind, EventLogEntry, MonthSnapshot, SimulationOutcome, TierAmounts,
    GAP_TOLERANCE, NEW_LOAN_ACCOUNT_TYPE, NEW_LOAN_PAYMENT_RATIO, NEW_LOAN_TERM_MONTHS,
};

/// Gap-resolution stages in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapStage {
    Reserve,
    Revolving,
    Borrow(LenderTier),
}

impl GapStage {
    fn next(self) -> Option<GapStage> {
        match self {
            GapStage::Reserve => Some(GapStage::Revolving),
            GapStage::Revolving => Some(GapStage::Borrow(LenderTier::T1)),
            GapStage::Borrow(LenderTier::T1) => Some(GapStage::Borrow(LenderTier::T2)),
            GapStage::Borrow(LenderTier::T2) => Some(GapStage::Borrow(LenderTier::T3)),
            GapStage::Borrow(LenderTier::T3) => None,
        }
    }
}

/// Owns the borrower's cash state and loan collection for one run
#[derive(Debug, Clone)]
pub struct Simulator {
    profile: BorrowerProfile,
    cash_reserve: f64,
    loans: Vec<Loan>,
    market: Market,
    month: u32,
    is_dead: bool,
    death_reason: Option<String>,
    log: Vec<EventLogEntry>,
    history: Vec<MonthSnapshot>,
    originated: usize,
}

impl Simulator {
    /// Build a simulator, rejecting invalid profiles and loans
    pub fn new(profile: BorrowerProfile, loans: Vec<Loan>, market: Market) -> Result<Self> {
        profile.validate()?;
        for loan in &loans {
            validate_loan(loan)?;
        }

        Ok(Self {
            cash_reserve: profile.initial_cash_reserve,
            profile,
            loans,
            market,
            month: 0,
            is_dead: false,
            death_reason: None,
            log: Vec::new(),
            history: Vec::new(),
            originated: 0,
        })
    }

    pub fn profile(&self) -> &BorrowerProfile {
        &self.profile
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cash_reserve(&self) -> f64 {
        self.cash_reserve
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn death_reason(&self) -> Option<&str> {
        self.death_reason.as_deref()
    }

    /// Month of default, if any
    pub fn death_month(&self) -> Option<u32> {
        self.is_dead.then_some(self.month)
    }

    pub fn log(&self) -> &[EventLogEntry] {
        &self.log
    }

    pub fn history(&self) -> &[MonthSnapshot] {
        &self.history
    }

    pub fn total_debt(&self) -> f64 {
        self.loans.iter().map(|l| l.balance).sum()
    }

    /// Advance one month
    ///
    /// Returns [`SimError::AdvanceAfterDefault`] without touching any state
    /// once the borrower has defaulted.
    pub fn advance_one_month(&mut self) -> Result<()> {
        if self.is_dead {
            return Err(SimError::AdvanceAfterDefault { month: self.month });
        }

        self.month += 1;

        let living_cost = self.profile.living_cost;
        self.record(EventKind::LivingCost, -living_cost, "");

        let scheduled = self.collect_scheduled_payments();
        let matured = self.settle_maturities();

        let income = self.profile.income;
        self.record(EventKind::Salary, income, "");

        let net_flow = income - (living_cost + scheduled + matured);
        let gap = if net_flow >= 0.0 {
            self.cash_reserve += net_flow;
            self.record(EventKind::Deposit, net_flow, format!("reserve {:.2}", self.cash_reserve));
            0.0
        } else {
            self.resolve_gap(-net_flow)
        };

        self.snapshot(gap);

        if gap > GAP_TOLERANCE {
            let reason = format!("cash flow broken: unmet gap of {:.2}", gap);
            info!("month {}: default, {}", self.month, reason);
            self.record(EventKind::Default, -gap, reason.clone());
            self.is_dead = true;
            self.death_reason = Some(reason);
        }

        Ok(())
    }

    /// Advance up to `months` months, stopping early on default
    pub fn run_for(&mut self, months: u32) -> Result<()> {
        for _ in 0..months {
            if self.is_dead {
                break;
            }
            self.advance_one_month()?;
        }
        Ok(())
    }

    /// Snapshot of the final state
    pub fn outcome(&self) -> SimulationOutcome {
        SimulationOutcome {
            is_dead: self.is_dead,
            death_month: self.death_month(),
            death_reason: self.death_reason.clone(),
            months_simulated: self.month,
            final_total_debt: self.total_debt(),
            final_cash_reserve: self.cash_reserve,
            history: self.history.clone(),
            log: self.log.clone(),
        }
    }

    pub fn into_outcome(self) -> SimulationOutcome {
        let final_total_debt = self.total_debt();
        let death_month = self.death_month();
        SimulationOutcome {
            is_dead: self.is_dead,
            death_month,
            death_reason: self.death_reason,
            months_simulated: self.month,
            final_total_debt,
            final_cash_reserve: self.cash_reserve,
            history: self.history,
            log: self.log,
        }
    }

    fn record(&mut self, event: EventKind, cash_delta: f64, detail: impl Into<String>) {
        self.log.push(EventLogEntry::new(self.month, event, cash_delta, detail));
    }

    /// Scheduled payments are a pure cash outflow: balances do not amortize
    fn collect_scheduled_payments(&mut self) -> f64 {
        let mut total = 0.0;
        let mut accounts = 0;
        for loan in self.loans.iter_mut().filter(|l| l.is_active()) {
            total += loan.monthly_payment;
            loan.months_to_maturity -= 1;
            accounts += 1;
        }
        self.record(EventKind::ScheduledPayments, -total, format!("{} accounts", accounts));
        total
    }

    /// Pay off every active loan whose countdown has run out
    fn settle_maturities(&mut self) -> f64 {
        let mut principal = 0.0;
        let mut matured = Vec::new();
        for loan in self.loans.iter_mut().filter(|l| l.is_active() && l.is_matured()) {
            principal += loan.balance;
            matured.push(format!("{} ({})", loan.name, loan.tier));
            loan.balance = 0.0;
        }
        if principal > 0.0 {
            self.record(EventKind::MaturedPrincipal, -principal, matured.join(", "));
        }
        principal
    }

    fn resolve_gap(&mut self, gap: f64) -> f64 {
        self.record(EventKind::CashGap, -gap, "outflow exceeds income");

        let mut gap = gap;
        let mut stage = Some(GapStage::Reserve);
        while let Some(current) = stage {
            if current != GapStage::Reserve && gap <= GAP_TOLERANCE {
                break;
            }
            let before = gap;
            gap = match current {
                GapStage::Reserve => self.draw_reserve(gap),
                GapStage::Revolving => self.draw_revolving(gap),
                GapStage::Borrow(tier) => self.borrow_from(tier, gap),
            };
            debug!("month {}: {:?} covered {:.2}, {:.2} left", self.month, current, before - gap, gap);
            stage = current.next();
        }
        gap
    }

    fn draw_reserve(&mut self, gap: f64) -> f64 {
        if self.cash_reserve <= 0.0 {
            return gap;
        }
        let used = self.cash_reserve.min(gap);
        self.cash_reserve -= used;
        self.record(EventKind::ReserveDrawn, used, format!("reserve {:.2}", self.cash_reserve));
        gap - used
    }

    /// First-fit over open revolving lines in portfolio order
    fn draw_revolving(&mut self, mut gap: f64) -> f64 {
        let month = self.month;
        for loan in self.loans.iter_mut() {
            let headroom = loan.headroom();
            if headroom <= 0.0 {
                continue;
            }
            let draw = headroom.min(gap);
            loan.balance += draw;
            gap -= draw;
            self.log.push(EventLogEntry::new(
                month,
                EventKind::RevolvingDraw,
                draw,
                format!("drawn from {}", loan.name),
            ));
            if gap <= GAP_TOLERANCE {
                break;
            }
        }
        gap
    }

    /// Keep applying to one tier until it refuses or the gap is covered
    fn borrow_from(&mut self, tier: LenderTier, mut gap: f64) -> f64 {
        while gap > GAP_TOLERANCE {
            let counts = ActiveCounts::from_loans(&self.loans);
            match self.market.evaluate(tier, self.profile.income, &counts) {
                OfferDecision::Refused(reason) => {
                    self.record(EventKind::ApplicationRejected, 0.0, reason.describe(tier));
                    break;
                }
                OfferDecision::Approved(offer) => {
                    let draw = offer.limit.min(gap);
                    self.originated += 1;
                    let loan = Loan::new(
                        format!("New {} #{} (month {})", tier, self.originated, self.month),
                        tier.origination_org_code(),
                        NEW_LOAN_ACCOUNT_TYPE,
                        offer.limit,
                        draw,
                        draw * NEW_LOAN_PAYMENT_RATIO,
                        NEW_LOAN_TERM_MONTHS,
                        Some(offer.rate),
                    );
                    debug!("month {}: originated {} for {:.2}", self.month, loan.name, draw);
                    self.loans.push(loan);
                    gap -= draw;
                    self.record(
                        EventKind::LoanOriginated,
                        draw,
                        format!("{} | limit {:.0} | rate {:.1}%", tier, offer.limit, offer.rate * 100.0),
                    );
                }
            }
        }
        gap
    }

    fn snapshot(&mut self, gap: f64) {
        let debt_by_tier = TierAmounts::from_loans(&self.loans);
        self.history.push(MonthSnapshot {
            month: self.month,
            debt_by_tier,
            total_debt: debt_by_tier.total(),
            cash_reserve: self.cash_reserve,
            unmet_gap: gap.max(0.0),
        });
    }
}

fn validate_loan(loan: &Loan) -> Result<()> {
    let fields = [
        ("credit_limit", loan.credit_limit),
        ("balance", loan.balance),
        ("monthly_payment", loan.monthly_payment),
        ("annual_rate", loan.annual_rate),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::InvalidLoan {
                name: loan.name.clone(),
                reason: format!("{} must be a non-negative number, got {}", field, value),
            });
        }
    }
    Ok(())
}
