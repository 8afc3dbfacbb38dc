//! Immutable market configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::loan::LenderTier;

/// Absolute annual rate ceiling (36%)
pub const DEFAULT_RATE_CEILING: f64 = 0.36;

/// How a tier sizes the limit of a first account, before decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LimitRule {
    /// Limit = monthly income x multiple
    IncomeMultiple { multiple: f64 },
    /// Fixed starting limit, independent of income; decayed limits never drop below `floor`
    FixedSchedule { start: f64, floor: f64 },
}

impl LimitRule {
    /// Limit offered when `count` accounts of the tier are already held
    pub fn decayed_limit(&self, income: f64, decay: f64, count: usize) -> f64 {
        let factor = decay.powi(count as i32);
        match *self {
            LimitRule::IncomeMultiple { multiple } => income * multiple * factor,
            LimitRule::FixedSchedule { start, floor } => (start * factor).max(floor),
        }
    }
}

/// Lending policy of one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    /// Maximum simultaneously held active accounts before the tier refuses
    pub max_accounts: usize,

    pub limit_rule: LimitRule,

    /// Per-additional-account limit decay (0, 1]
    pub decay: f64,

    /// Annual rate for a borrower with no accounts in the tier
    pub base_rate: f64,
}

impl TierPolicy {
    pub fn default_t1() -> Self {
        Self {
            max_accounts: 2,
            limit_rule: LimitRule::IncomeMultiple { multiple: 12.0 },
            decay: 0.90,
            base_rate: 0.08,
        }
    }

    pub fn default_t2() -> Self {
        Self {
            max_accounts: 5,
            limit_rule: LimitRule::IncomeMultiple { multiple: 4.0 },
            decay: 0.85,
            base_rate: 0.18,
        }
    }

    pub fn default_t3() -> Self {
        Self {
            max_accounts: 20,
            limit_rule: LimitRule::FixedSchedule { start: 30_000.0, floor: 2_000.0 },
            decay: 0.50,
            base_rate: 0.24,
        }
    }

    fn validate(&self, tier: LenderTier) -> Result<()> {
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(SimError::InvalidMarket(format!(
                "{} decay must be in (0, 1], got {}", tier, self.decay
            )));
        }
        if !self.base_rate.is_finite() || self.base_rate < 0.0 {
            return Err(SimError::InvalidMarket(format!(
                "{} base_rate must be a non-negative number, got {}", tier, self.base_rate
            )));
        }
        match self.limit_rule {
            LimitRule::IncomeMultiple { multiple } => {
                if !multiple.is_finite() || multiple < 0.0 {
                    return Err(SimError::InvalidMarket(format!(
                        "{} limit multiple must be non-negative, got {}", tier, multiple
                    )));
                }
            }
            LimitRule::FixedSchedule { start, floor } => {
                if !start.is_finite() || start < 0.0 || !floor.is_finite() || floor < 0.0 {
                    return Err(SimError::InvalidMarket(format!(
                        "{} fixed limit schedule must be non-negative, got start {} floor {}",
                        tier, start, floor
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Market policy parameters, shared read-only by every offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "TierPolicy::default_t1")]
    pub t1: TierPolicy,

    #[serde(default = "TierPolicy::default_t2")]
    pub t2: TierPolicy,

    #[serde(default = "TierPolicy::default_t3")]
    pub t3: TierPolicy,

    /// Rate multiplier applied once per active account already held in the requested tier
    #[serde(default = "default_penalty_exponent")]
    pub penalty_exponent: f64,

    /// Any active T3 account blocks new T1 offers
    #[serde(default = "default_toxic_block")]
    pub toxic_block: bool,

    #[serde(default = "default_rate_ceiling")]
    pub rate_ceiling: f64,
}

fn default_penalty_exponent() -> f64 { 1.15 }
fn default_toxic_block() -> bool { true }
fn default_rate_ceiling() -> f64 { DEFAULT_RATE_CEILING }

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            t1: TierPolicy::default_t1(),
            t2: TierPolicy::default_t2(),
            t3: TierPolicy::default_t3(),
            penalty_exponent: 1.15,
            toxic_block: true,
            rate_ceiling: DEFAULT_RATE_CEILING,
        }
    }
}

impl MarketConfig {
    /// A market in which every tier refuses all applications
    pub fn closed() -> Self {
        let mut config = Self::default();
        config.t1.max_accounts = 0;
        config.t2.max_accounts = 0;
        config.t3.max_accounts = 0;
        config
    }

    pub fn tier(&self, tier: LenderTier) -> &TierPolicy {
        match tier {
            LenderTier::T1 => &self.t1,
            LenderTier::T2 => &self.t2,
            LenderTier::T3 => &self.t3,
        }
    }

    /// Reject parameters the offer rules cannot work with
    pub fn validate(&self) -> Result<()> {
        for tier in LenderTier::ALL {
            self.tier(tier).validate(tier)?;
        }
        if !self.penalty_exponent.is_finite() || self.penalty_exponent < 1.0 {
            return Err(SimError::InvalidMarket(format!(
                "penalty_exponent must be >= 1, got {}", self.penalty_exponent
            )));
        }
        if !(self.rate_ceiling > 0.0 && self.rate_ceiling <= 1.0) {
            return Err(SimError::InvalidMarket(format!(
                "rate_ceiling must be in (0, 1], got {}", self.rate_ceiling
            )));
        }
        Ok(())
    }
}
