//! End-to-end behavior of the simulation over full horizons

use approx::assert_relative_eq;
use debt_spiral::market::ActiveCounts;
use debt_spiral::simulation::{EventKind, EventLogEntry};
use debt_spiral::{
    BorrowerProfile, LenderTier, Loan, LoanRecord, Market, MarketConfig, Scenario, SimError, Simulator,
};

fn month_events(log: &[EventLogEntry], month: u32) -> Vec<&EventLogEntry> {
    log.iter().filter(|e| e.month == month).collect()
}

fn stressed_scenario() -> Scenario {
    let mut scenario = Scenario::demo();
    scenario.profile.income = 9_000.0;
    scenario.months = 36;
    scenario
}

#[test]
fn surplus_months_grow_reserve_without_borrowing() {
    let outcome = Scenario::demo().run().expect("demo is valid");

    let mut previous_reserve = Scenario::demo().profile.initial_cash_reserve;
    for snap in &outcome.history {
        let events = month_events(&outcome.log, snap.month);
        if let Some(deposit) = events.iter().find(|e| e.event == EventKind::Deposit) {
            assert_relative_eq!(snap.cash_reserve, previous_reserve + deposit.cash_delta, epsilon = 1e-6);
            assert!(!events.iter().any(|e| e.event == EventKind::LoanOriginated));
            assert!(!events.iter().any(|e| e.event == EventKind::RevolvingDraw));
        }
        previous_reserve = snap.cash_reserve;
    }
}

#[test]
fn surplus_month_with_one_revolving_line() {
    let loans = vec![Loan::new("Online line", 51, "R1", 20_000.0, 19_000.0, 600.0, 12, None)];
    let market = Market::new(MarketConfig::default()).expect("valid");
    let mut sim = Simulator::new(BorrowerProfile::new(12_000.0, 3_500.0, 0.0), loans, market).expect("valid");

    sim.advance_one_month().expect("alive");

    assert_relative_eq!(sim.cash_reserve(), 7_900.0);
    assert_eq!(sim.loans().len(), 1);
    assert!(!sim.is_dead());
}

#[test]
fn closed_market_default_example() {
    let market = Market::new(MarketConfig::closed()).expect("valid");
    let mut sim = Simulator::new(BorrowerProfile::new(5_000.0, 6_000.0, 0.0), Vec::new(), market).expect("valid");

    sim.run_for(24).expect("stops at default");

    let outcome = sim.outcome();
    assert!(outcome.is_dead);
    assert_eq!(outcome.death_month, Some(1));
    assert!(outcome.death_reason.as_deref().unwrap_or_default().contains("1000.00"));
    assert_eq!(outcome.history.len(), 1);
    assert!(matches!(sim.advance_one_month(), Err(SimError::AdvanceAfterDefault { .. })));
}

#[test]
fn no_snapshot_after_default() {
    let outcome = stressed_scenario().run().expect("valid");
    if let Some(month) = outcome.death_month {
        assert!(outcome.history.iter().all(|s| s.month <= month));
        assert_eq!(outcome.history.last().map(|s| s.month), Some(month));
        assert!(outcome.log.iter().all(|e| e.month <= month));
        assert!(outcome.history.last().map(|s| s.unmet_gap > 1.0).unwrap_or(false));
    }
}

#[test]
fn t2_is_only_used_after_t1_refuses() {
    let outcome = stressed_scenario().run().expect("valid");

    for snap in &outcome.history {
        let events = month_events(&outcome.log, snap.month);
        let first_t2 = events.iter().position(|e| {
            e.event == EventKind::LoanOriginated && e.detail.starts_with("T2")
        });
        if let Some(t2_index) = first_t2 {
            let t1_refused = events[..t2_index]
                .iter()
                .any(|e| e.event == EventKind::ApplicationRejected && e.detail.starts_with("T1"));
            assert!(t1_refused, "month {} used T2 while T1 was open", snap.month);
        }
    }
}

#[test]
fn toxic_block_refuses_every_t1_request() {
    let market = Market::new(MarketConfig::default()).expect("valid");
    for t1 in 0..2 {
        for t3 in 1..5 {
            let offer = market.offer(LenderTier::T1, 100_000.0, &ActiveCounts::new(t1, 0, t3));
            assert!(!offer.is_available());
            assert_eq!(offer.limit, 0.0);
            assert_eq!(offer.rate, 0.0);
        }
    }
}

#[test]
fn maturity_countdown_and_single_payoff() {
    let records = vec![LoanRecord {
        name: "Bank installment".to_string(),
        lender_org_code: 11,
        account_type_code: "D1".to_string(),
        credit_limit: 30_000.0,
        balance: 24_000.0,
        monthly_payment: 1_000.0,
        months_to_maturity: 5,
        annual_rate: None,
    }];
    let scenario = Scenario {
        name: "bullet".to_string(),
        profile: BorrowerProfile::new(30_000.0, 2_000.0, 0.0),
        loans: records,
        market: MarketConfig::default(),
        months: 12,
    };

    let mut sim = scenario.build_simulator().expect("valid");
    for month in 1..=5 {
        sim.advance_one_month().expect("alive");
        assert_eq!(sim.loans()[0].months_to_maturity, 5 - month);
    }
    assert_eq!(sim.loans()[0].balance, 0.0);

    sim.run_for(7).expect("alive");
    assert_eq!(sim.month(), 12);
    assert_eq!(sim.loans()[0].balance, 0.0);
    let payoffs = sim
        .log()
        .iter()
        .filter(|e| e.event == EventKind::MaturedPrincipal)
        .count();
    assert_eq!(payoffs, 1);
}

#[test]
fn repeated_runs_are_identical() {
    let scenario = stressed_scenario();
    let first = scenario.run().expect("valid");
    let second = scenario.clone().run().expect("valid");
    assert_eq!(first.history, second.history);
    assert_eq!(first.log, second.log);
    assert_eq!(first, second);
}
