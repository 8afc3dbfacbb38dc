//! Scenario definition, loading and full-horizon runs
//!
//! A scenario bundles everything one run needs. Running it always builds fresh
//! `Loan` values from the stored records, so a scenario can be run any number
//! of times (or cloned into a sweep) without runs sharing state.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::analysis::{maturity_wall, MaturityWall};
use crate::error::Result;
use crate::loan::{loans_from_records, LoanRecord};
use crate::market::{Market, MarketConfig};
use crate::simulation::{BorrowerProfile, SimulationOutcome, Simulator};

/// Default projection horizon in months
pub const DEFAULT_HORIZON_MONTHS: u32 = 24;

/// Inputs for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,

    pub profile: BorrowerProfile,

    #[serde(default)]
    pub loans: Vec<LoanRecord>,

    #[serde(default)]
    pub market: MarketConfig,

    /// Horizon in months
    #[serde(default = "default_months")]
    pub months: u32,
}

fn default_name() -> String { "scenario".to_string() }
fn default_months() -> u32 { DEFAULT_HORIZON_MONTHS }

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Sample borrower: five accounts across all three tiers
    pub fn demo() -> Self {
        let record = |name: &str, org: u32, kind: &str, limit: f64, balance: f64, payment: f64, months: i32, rate: f64| {
            LoanRecord {
                name: name.to_string(),
                lender_org_code: org,
                account_type_code: kind.to_string(),
                credit_limit: limit,
                balance,
                monthly_payment: payment,
                months_to_maturity: months,
                annual_rate: Some(rate),
            }
        };

        Self {
            name: "demo".to_string(),
            profile: BorrowerProfile::new(12_000.0, 3_500.0, 15_000.0),
            loans: vec![
                record("Bank credit card", 11, "R2", 60_000.0, 58_000.0, 6_000.0, 6, 0.15),
                record("Bank quick loan", 11, "D1", 100_000.0, 80_000.0, 3_500.0, 24, 0.06),
                record("Consumer finance loan", 24, "D1", 40_000.0, 38_000.0, 3_200.0, 12, 0.18),
                record("Online bank credit line", 12, "R4", 30_000.0, 28_000.0, 2_800.0, 10, 0.16),
                record("Microcredit loan", 51, "D1", 20_000.0, 15_000.0, 1_500.0, 12, 0.24),
            ],
            market: MarketConfig::default(),
            months: DEFAULT_HORIZON_MONTHS,
        }
    }

    /// Fresh simulator over an independent copy of the portfolio
    pub fn build_simulator(&self) -> Result<Simulator> {
        let market = Market::new(self.market.clone())?;
        Simulator::new(self.profile.clone(), loans_from_records(&self.loans), market)
    }

    /// Run to the horizon or the default month, whichever comes first
    pub fn run(&self) -> Result<SimulationOutcome> {
        let mut sim = self.build_simulator()?;
        sim.run_for(self.months)?;
        let outcome = sim.into_outcome();
        match outcome.death_month {
            Some(month) => info!("{}: defaulted in month {}", self.name, month),
            None => info!("{}: survived {} months", self.name, outcome.months_simulated),
        }
        Ok(outcome)
    }

    /// Principal due per month over the horizon, before any simulation
    pub fn maturity_wall(&self) -> MaturityWall {
        maturity_wall(&loans_from_records(&self.loans), self.profile.income, self.months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_demo_runs_consistently() {
        let scenario = Scenario::demo();
        let outcome = scenario.run().expect("demo is valid");

        assert_eq!(outcome.history.len() as u32, outcome.months_simulated);
        assert!(outcome.months_simulated <= scenario.months);
        if let Some(month) = outcome.death_month {
            assert!(outcome.is_dead);
            assert_eq!(outcome.history.last().map(|s| s.month), Some(month));
        } else {
            assert_eq!(outcome.months_simulated, scenario.months);
        }

        // Scenario records are untouched by the run
        assert_eq!(scenario, Scenario::demo());
        assert_eq!(scenario.run().expect("second run"), outcome);
    }

    #[test]
    fn test_demo_maturity_wall() {
        let wall = Scenario::demo().maturity_wall();
        assert_eq!(wall.buckets.len(), 24);
        assert_eq!(wall.breach_months(), vec![6, 10, 12, 24]);
    }

    #[test]
    fn test_json_scenario() {
        let json = r#"{
            "profile": {"income": 5000.0, "living_cost": 6000.0},
            "market": {"t1": {"max_accounts": 0, "limit_rule": {"kind": "income_multiple", "multiple": 12.0}, "decay": 0.9, "base_rate": 0.08},
                       "t2": {"max_accounts": 0, "limit_rule": {"kind": "income_multiple", "multiple": 4.0}, "decay": 0.85, "base_rate": 0.18},
                       "t3": {"max_accounts": 0, "limit_rule": {"kind": "fixed_schedule", "start": 30000.0, "floor": 2000.0}, "decay": 0.5, "base_rate": 0.24}}
        }"#;
        let scenario = Scenario::from_json_reader(json.as_bytes()).expect("parses");
        assert_eq!(scenario.months, 24);
        assert!(scenario.loans.is_empty());

        let outcome = scenario.run().expect("valid");
        assert!(outcome.is_dead);
        assert_eq!(outcome.death_month, Some(1));
    }

    #[test]
    fn test_invalid_scenario_fails_before_running() {
        let mut scenario = Scenario::demo();
        scenario.profile.income = -1.0;
        assert!(matches!(scenario.run(), Err(SimError::InvalidProfile { .. })));

        let mut scenario = Scenario::demo();
        scenario.market.t1.decay = 2.0;
        assert!(matches!(scenario.run(), Err(SimError::InvalidMarket(_))));
    }
}
