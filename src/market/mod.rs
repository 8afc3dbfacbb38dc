//! Credit market policy: limits, rates and multi-lender penalties per tier

mod config;
mod offer;

pub use config::{MarketConfig, TierPolicy, LimitRule, DEFAULT_RATE_CEILING};
pub use offer::{Market, ActiveCounts, Offer, OfferDecision, RefusalReason};
