//! Parameter sweeps over independent scenario copies
//!
//! Each point clones the base scenario, changes one parameter and runs it on
//! its own simulator, so points can run in parallel and never share loans.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::scenario::Scenario;

/// Parameter varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepAxis {
    Income,
    LivingCost,
    InitialReserve,
    PenaltyExponent,
    /// 0 disables the toxic block, anything else enables it
    ToxicBlock,
}

impl SweepAxis {
    /// Copy of `base` with this axis set to `value`
    pub fn apply(self, base: &Scenario, value: f64) -> Scenario {
        let mut scenario = base.clone();
        match self {
            SweepAxis::Income => scenario.profile.income = value,
            SweepAxis::LivingCost => scenario.profile.living_cost = value,
            SweepAxis::InitialReserve => scenario.profile.initial_cash_reserve = value,
            SweepAxis::PenaltyExponent => scenario.market.penalty_exponent = value,
            SweepAxis::ToxicBlock => scenario.market.toxic_block = value != 0.0,
        }
        scenario.name = format!("{} [{}={}]", base.name, self, value);
        scenario
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SweepAxis::Income => "income",
            SweepAxis::LivingCost => "living_cost",
            SweepAxis::InitialReserve => "initial_reserve",
            SweepAxis::PenaltyExponent => "penalty_exponent",
            SweepAxis::ToxicBlock => "toxic_block",
        };
        f.write_str(label)
    }
}

/// Summary of one sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub survived: bool,
    pub death_month: Option<u32>,
    pub final_total_debt: f64,
    pub final_cash_reserve: f64,
    pub loans_originated: usize,
}

/// Run one scenario per value in parallel; results keep input order
pub fn run_sweep(base: &Scenario, axis: SweepAxis, values: &[f64]) -> Result<Vec<SweepPoint>> {
    values
        .par_iter()
        .map(|&value| run_point(base, axis, value))
        .collect()
}

fn run_point(base: &Scenario, axis: SweepAxis, value: f64) -> Result<SweepPoint> {
    let scenario = axis.apply(base, value);
    let mut sim = scenario.build_simulator()?;
    sim.run_for(scenario.months)?;

    let loans_originated = sim.loans().len().saturating_sub(scenario.loans.len());
    let outcome = sim.into_outcome();
    Ok(SweepPoint {
        value,
        survived: outcome.survived(),
        death_month: outcome.death_month,
        final_total_debt: outcome.final_total_debt,
        final_cash_reserve: outcome.final_cash_reserve,
        loans_originated,
    })
}

/// Evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        let values = linspace(10_000.0, 20_000.0, 5);
        assert_eq!(values.len(), 5);
        assert_relative_eq!(values[1], 12_500.0);
        assert_relative_eq!(values[4], 20_000.0);
    }

    #[test]
    fn test_axis_apply_leaves_base_untouched() {
        let base = Scenario::demo();
        let varied = SweepAxis::Income.apply(&base, 30_000.0);
        assert_eq!(varied.profile.income, 30_000.0);
        assert_eq!(base.profile.income, 12_000.0);

        let open = SweepAxis::ToxicBlock.apply(&base, 0.0);
        assert!(!open.market.toxic_block);
        assert!(base.market.toxic_block);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let base = Scenario::demo();
        let values = linspace(8_000.0, 40_000.0, 9);
        let parallel = run_sweep(&base, SweepAxis::Income, &values).expect("valid sweep");

        let sequential: Vec<SweepPoint> = values
            .iter()
            .map(|&v| run_point(&base, SweepAxis::Income, v).expect("valid point"))
            .collect();

        assert_eq!(parallel, sequential);
        let order: Vec<f64> = parallel.iter().map(|p| p.value).collect();
        assert_eq!(order, values);
    }

    #[test]
    fn test_high_income_survives() {
        let base = Scenario::demo();
        // Income covers living cost, every payment and the largest single maturity
        let points = run_sweep(&base, SweepAxis::Income, &[200_000.0]).expect("valid sweep");
        assert!(points[0].survived);
        assert_eq!(points[0].death_month, None);
        assert_eq!(points[0].loans_originated, 0);
    }

    #[test]
    fn test_invalid_point_is_an_error() {
        let base = Scenario::demo();
        assert!(run_sweep(&base, SweepAxis::Income, &[12_000.0, 0.0]).is_err());
    }
}
