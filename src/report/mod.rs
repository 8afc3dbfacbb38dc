//! CSV export of simulation output

use serde::Serialize;
use std::io::Write;

use crate::analysis::MaturityWall;
use crate::error::Result;
use crate::simulation::{EventLogEntry, MonthSnapshot};
use crate::sweep::SweepPoint;

#[derive(Debug, Serialize)]
struct HistoryRow {
    month: u32,
    t1_debt: f64,
    t2_debt: f64,
    t3_debt: f64,
    total_debt: f64,
    cash_reserve: f64,
    unmet_gap: f64,
}

#[derive(Debug, Serialize)]
struct LogRow<'a> {
    month: u32,
    category: String,
    event: &'static str,
    cash_delta: f64,
    detail: &'a str,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    value: f64,
    survived: bool,
    death_month: Option<u32>,
    final_total_debt: f64,
    final_cash_reserve: f64,
    loans_originated: usize,
}

/// Write one row per simulated month
pub fn write_history<W: Write>(writer: W, history: &[MonthSnapshot]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for snap in history {
        csv.serialize(HistoryRow {
            month: snap.month,
            t1_debt: snap.debt_by_tier.t1,
            t2_debt: snap.debt_by_tier.t2,
            t3_debt: snap.debt_by_tier.t3,
            total_debt: snap.total_debt,
            cash_reserve: snap.cash_reserve,
            unmet_gap: snap.unmet_gap,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the event log in order
pub fn write_event_log<W: Write>(writer: W, log: &[EventLogEntry]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in log {
        csv.serialize(LogRow {
            month: entry.month,
            category: format!("{:?}", entry.category),
            event: entry.event_name(),
            cash_delta: entry.cash_delta,
            detail: &entry.detail,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one row per maturity month
pub fn write_maturity_wall<W: Write>(writer: W, wall: &MaturityWall) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for bucket in &wall.buckets {
        csv.serialize(bucket)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_sweep<W: Write>(writer: W, points: &[SweepPoint]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in points {
        csv.serialize(SweepRow {
            value: point.value,
            survived: point.survived,
            death_month: point.death_month,
            final_total_debt: point.final_total_debt,
            final_cash_reserve: point.final_cash_reserve,
            loans_originated: point.loans_originated,
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{EventKind, TierAmounts};

    #[test]
    fn test_history_csv() {
        let history = vec![MonthSnapshot {
            month: 1,
            debt_by_tier: TierAmounts { t1: 100.0, t2: 0.0, t3: 50.0 },
            total_debt: 150.0,
            cash_reserve: 10.0,
            unmet_gap: 0.0,
        }];
        let mut buf = Vec::new();
        write_history(&mut buf, &history).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,t1_debt,t2_debt,t3_debt,total_debt,cash_reserve,unmet_gap")
        );
        assert_eq!(lines.next(), Some("1,100.0,0.0,50.0,150.0,10.0,0.0"));
    }

    #[test]
    fn test_event_log_csv() {
        let log = vec![EventLogEntry::new(2, EventKind::RevolvingDraw, 500.0, "drawn from Card, main")];
        let mut buf = Vec::new();
        write_event_log(&mut buf, &log).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("month,category,event,cash_delta,detail\n"));
        assert!(text.contains("2,GapFill,revolving draw,500.0,\"drawn from Card, main\""));
    }

    #[test]
    fn test_sweep_csv_empty_death_month() {
        let points = vec![SweepPoint {
            value: 12_000.0,
            survived: true,
            death_month: None,
            final_total_debt: 0.0,
            final_cash_reserve: 1.0,
            loans_originated: 0,
        }];
        let mut buf = Vec::new();
        write_sweep(&mut buf, &points).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("12000.0,true,,0.0,1.0,0"));
    }
}
