//! Offer evaluation
//!
//! The market is a pure function of (tier, income, active-account counts) over
//! its fixed configuration. Refusals are ordinary outcomes, reported as a zero
//! offer with a reason.

use crate::error::Result;
use crate::loan::{LenderTier, Loan};

use super::MarketConfig;

/// Active (balance > 0) account counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveCounts([usize; 3]);

impl ActiveCounts {
    pub fn new(t1: usize, t2: usize, t3: usize) -> Self {
        Self([t1, t2, t3])
    }

    pub fn from_loans(loans: &[Loan]) -> Self {
        let mut counts = Self::default();
        for loan in loans.iter().filter(|l| l.is_active()) {
            counts.0[loan.tier.index()] += 1;
        }
        counts
    }

    pub fn get(&self, tier: LenderTier) -> usize {
        self.0[tier.index()]
    }
}

/// A credit offer; `limit == 0` means no offer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offer {
    pub limit: f64,
    pub rate: f64,
}

impl Offer {
    pub const NONE: Offer = Offer { limit: 0.0, rate: 0.0 };

    pub fn is_available(&self) -> bool {
        self.limit > 0.0
    }
}

/// Why a tier declined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// Borrower holds active T3 debt and the market blocks T1 on it
    ToxicBlock,
    /// Tier's account cap is reached
    MaxAccounts { held: usize, max: usize },
    /// Decayed limit rounds to nothing
    ZeroLimit,
}

impl RefusalReason {
    pub fn describe(&self, tier: LenderTier) -> String {
        match self {
            RefusalReason::ToxicBlock => {
                format!("{} refused: active T3 debt blocks bank credit", tier)
            }
            RefusalReason::MaxAccounts { held, max } => {
                format!("{} refused: {} active accounts (max {})", tier, held, max)
            }
            RefusalReason::ZeroLimit => format!("{} refused: no remaining limit", tier),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfferDecision {
    Approved(Offer),
    Refused(RefusalReason),
}

/// Stateless offer policy over an immutable configuration
#[derive(Debug, Clone)]
pub struct Market {
    config: MarketConfig,
}

impl Market {
    /// Build a market, failing on invalid configuration
    pub fn new(config: MarketConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Evaluate an application, keeping the refusal reason
    pub fn evaluate(&self, tier: LenderTier, income: f64, counts: &ActiveCounts) -> OfferDecision {
        if self.config.toxic_block && tier == LenderTier::T1 && counts.get(LenderTier::T3) > 0 {
            return OfferDecision::Refused(RefusalReason::ToxicBlock);
        }

        let policy = self.config.tier(tier);
        let held = counts.get(tier);
        if held >= policy.max_accounts {
            return OfferDecision::Refused(RefusalReason::MaxAccounts {
                held,
                max: policy.max_accounts,
            });
        }

        let limit = policy.limit_rule.decayed_limit(income, policy.decay, held);
        let rate = (policy.base_rate * self.config.penalty_exponent.powi(held as i32))
            .min(self.config.rate_ceiling);

        let offer = Offer {
            limit: round_to(limit, 2),
            rate: round_to(rate, 4),
        };
        if offer.is_available() {
            OfferDecision::Approved(offer)
        } else {
            OfferDecision::Refused(RefusalReason::ZeroLimit)
        }
    }

    /// Offer for a tier, or [`Offer::NONE`] when refused
    pub fn offer(&self, tier: LenderTier, income: f64, counts: &ActiveCounts) -> Offer {
        match self.evaluate(tier, income, counts) {
            OfferDecision::Approved(offer) => offer,
            OfferDecision::Refused(_) => Offer::NONE,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
