//! Run one debt-spiral scenario
//!
//! Prints the maturity wall and the outcome; optionally writes the monthly
//! history and event log as CSV.

use anyhow::{Context, Result};
use clap::Parser;
use debt_spiral::report::{write_event_log, write_history, write_maturity_wall};
use debt_spiral::Scenario;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Simulate a borrower's debt spiral month by month")]
struct Args {
    /// Scenario JSON file (runs the built-in demo borrower when omitted)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Override the scenario horizon in months
    #[arg(short, long)]
    months: Option<u32>,

    /// Disable the T3 -> T1 toxic block
    #[arg(long)]
    no_toxic_block: bool,

    /// Directory for history.csv, events.csv and maturity_wall.csv
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_json_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::demo(),
    };
    if let Some(months) = args.months {
        scenario.months = months;
    }
    if args.no_toxic_block {
        scenario.market.toxic_block = false;
    }

    println!("Scenario: {} ({} loans, {} months)", scenario.name, scenario.loans.len(), scenario.months);
    println!(
        "Income {:.0} | Living cost {:.0} | Reserve {:.0}",
        scenario.profile.income, scenario.profile.living_cost, scenario.profile.initial_cash_reserve
    );

    let wall = scenario.maturity_wall();
    println!("\nMaturity wall (principal due vs income {:.0}):", wall.income);
    println!("{:>5} | {:>12}", "Month", "Principal");
    for bucket in wall.buckets.iter().filter(|b| b.principal_due > 0.0) {
        let flag = if bucket.exceeds_income { "  <- exceeds income" } else { "" };
        println!("{:>5} | {:>12.0}{}", bucket.month, bucket.principal_due, flag);
    }

    let start = Instant::now();
    let outcome = scenario.run().context("simulation failed")?;

    println!("\nMonth | {:>10} | {:>10} | {:>10} | {:>10} | {:>10} | {:>8}",
             "T1", "T2", "T3", "Total", "Reserve", "Gap");
    for snap in &outcome.history {
        println!("{:5} | {:10.0} | {:10.0} | {:10.0} | {:10.0} | {:10.0} | {:8.0}",
                 snap.month,
                 snap.debt_by_tier.t1,
                 snap.debt_by_tier.t2,
                 snap.debt_by_tier.t3,
                 snap.total_debt,
                 snap.cash_reserve,
                 snap.unmet_gap);
    }

    println!();
    match (outcome.death_month, &outcome.death_reason) {
        (Some(month), Some(reason)) => println!("DEFAULT in month {}: {}", month, reason),
        _ => println!("Survived {} months", outcome.months_simulated),
    }
    println!("Final total debt: {:.2}", outcome.final_total_debt);
    println!("Simulated in {:?}", start.elapsed());

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

        let history_path = dir.join("history.csv");
        write_history(File::create(&history_path)?, &outcome.history)
            .with_context(|| format!("failed to write {}", history_path.display()))?;

        let events_path = dir.join("events.csv");
        write_event_log(File::create(&events_path)?, &outcome.log)
            .with_context(|| format!("failed to write {}", events_path.display()))?;

        let wall_path = dir.join("maturity_wall.csv");
        write_maturity_wall(File::create(&wall_path)?, &wall)
            .with_context(|| format!("failed to write {}", wall_path.display()))?;

        println!("Output written to {}", dir.display());
    }

    Ok(())
}
