//! Sweep monthly income and report the default month at each level

use anyhow::{bail, Context, Result};
use clap::Parser;
use debt_spiral::report::write_sweep;
use debt_spiral::sweep::{linspace, run_sweep, SweepAxis};
use debt_spiral::Scenario;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(about = "Run a scenario across a range of monthly incomes")]
struct Args {
    /// Scenario JSON file (runs the built-in demo borrower when omitted)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    #[arg(long, default_value_t = 6_000.0)]
    from: f64,

    #[arg(long, default_value_t = 30_000.0)]
    to: f64,

    /// Number of income levels
    #[arg(long, default_value_t = 25)]
    steps: usize,

    /// Write results to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.from <= 0.0 || args.to < args.from {
        bail!("income range must satisfy 0 < from <= to (got {} .. {})", args.from, args.to);
    }

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_json_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::demo(),
    };

    let incomes = linspace(args.from, args.to, args.steps);
    let start = Instant::now();
    let points = run_sweep(&scenario, SweepAxis::Income, &incomes).context("sweep failed")?;

    println!("{:>10} | {:>8} | {:>12} | {:>10}", "Income", "Default", "Final debt", "New loans");
    for point in &points {
        let death = point
            .death_month
            .map(|m| format!("month {}", m))
            .unwrap_or_else(|| "-".to_string());
        println!("{:10.0} | {:>8} | {:12.0} | {:10}",
                 point.value, death, point.final_total_debt, point.loans_originated);
    }

    if let Some(threshold) = points.iter().find(|p| p.survived) {
        println!("\nLowest surviving income: {:.0}", threshold.value);
    } else {
        println!("\nNo income level in range survives {} months", scenario.months);
    }
    println!("{} runs in {:?}", points.len(), start.elapsed());

    if let Some(path) = &args.output {
        write_sweep(File::create(path)?, &points)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Output written to {}", path.display());
    }

    Ok(())
}
