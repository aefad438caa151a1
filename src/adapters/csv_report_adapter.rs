//! CSV result export.
//!
//! Writes every run's snapshot sequence into one wide CSV: fixed
//! `date,advisor,portfolio_value_usd,cash` columns followed by a
//! `{T}_quantity,{T}_close,{T}_value_usd` triple per ticker. The day-0 row of
//! each run carries `Initial` in the advisor column so downstream tooling can
//! tell the seeded allocation from the advisor's first trading day.

use crate::domain::error::StockAdvisorError;
use crate::domain::snapshot::SimulationRun;
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        CsvReportAdapter
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, runs: &[SimulationRun], output_path: &str) -> Result<(), StockAdvisorError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(csv_error)?;

        // Column order comes from the first snapshot's position order, which
        // is the simulation's ticker input order. Every run shares it.
        let tickers: Vec<String> = runs
            .first()
            .and_then(|run| run.snapshots.first())
            .map(|snapshot| snapshot.positions.iter().map(|p| p.ticker.clone()).collect())
            .unwrap_or_default();

        let mut header = vec![
            "date".to_string(),
            "advisor".to_string(),
            "portfolio_value_usd".to_string(),
            "cash".to_string(),
        ];
        for ticker in &tickers {
            header.push(format!("{ticker}_quantity"));
            header.push(format!("{ticker}_close"));
            header.push(format!("{ticker}_value_usd"));
        }
        wtr.write_record(&header).map_err(csv_error)?;

        for run in runs {
            for snapshot in &run.snapshots {
                let advisor = if snapshot.is_initial {
                    "Initial".to_string()
                } else {
                    snapshot.advisor.clone()
                };

                let mut record = vec![
                    snapshot.date.format("%Y-%m-%d").to_string(),
                    advisor,
                    format!("{:.2}", snapshot.total_value_usd),
                    format!("{:.2}", snapshot.cash),
                ];
                for position in &snapshot.positions {
                    record.push(format!("{:.3}", position.quantity));
                    record.push(position.close.map(|c| format!("{c:.2}")).unwrap_or_default());
                    record.push(
                        position
                            .value_usd
                            .map(|v| format!("{v:.2}"))
                            .unwrap_or_default(),
                    );
                }
                wtr.write_record(&record).map_err(csv_error)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> StockAdvisorError {
    StockAdvisorError::Data {
        reason: format!("failed to write results: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holdings::Holdings;
    use crate::domain::snapshot::{Snapshot, TickerState};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn state(ticker: &str, quantity: f64, close: Option<f64>) -> TickerState {
        TickerState {
            ticker: ticker.into(),
            quantity,
            close,
            value_usd: close.map(|c| quantity * c),
        }
    }

    fn sample_run() -> SimulationRun {
        SimulationRun {
            advisor: "always_hold".into(),
            initial_holdings: Holdings::new(500.0),
            snapshots: vec![
                Snapshot {
                    date: date(10),
                    advisor: "always_hold".into(),
                    is_initial: true,
                    total_value_usd: 1000.0,
                    cash: 500.0,
                    positions: vec![state("AAPL", 5.0, Some(100.0))],
                },
                Snapshot {
                    date: date(11),
                    advisor: "always_hold".into(),
                    is_initial: false,
                    total_value_usd: 1050.0,
                    cash: 500.0,
                    positions: vec![state("AAPL", 5.0, Some(110.0))],
                },
            ],
        }
    }

    fn write_to_string(runs: &[SimulationRun]) -> String {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        CsvReportAdapter::new()
            .write(runs, path.to_str().unwrap())
            .unwrap();
        fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn header_has_a_column_triple_per_ticker() {
        let content = write_to_string(&[sample_run()]);
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "date,advisor,portfolio_value_usd,cash,AAPL_quantity,AAPL_close,AAPL_value_usd"
        );
    }

    #[test]
    fn initial_row_is_labeled() {
        let content = write_to_string(&[sample_run()]);
        let mut lines = content.lines().skip(1);
        assert_eq!(
            lines.next().unwrap(),
            "2024-07-10,Initial,1000.00,500.00,5.000,100.00,500.00"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-07-11,always_hold,1050.00,500.00,5.000,110.00,550.00"
        );
    }

    #[test]
    fn missing_close_leaves_empty_cells() {
        let mut run = sample_run();
        run.snapshots[1].positions = vec![state("AAPL", 5.0, None)];
        let content = write_to_string(&[run]);
        assert_eq!(
            content.lines().nth(2).unwrap(),
            "2024-07-11,always_hold,1050.00,500.00,5.000,,"
        );
    }

    #[test]
    fn runs_are_appended_in_order() {
        let mut second = sample_run();
        second.advisor = "always_cash".into();
        for snapshot in &mut second.snapshots {
            snapshot.advisor = "always_cash".into();
        }

        let content = write_to_string(&[sample_run(), second]);
        // header + 2 rows per run
        assert_eq!(content.lines().count(), 5);
        assert!(content.contains("always_cash"));
    }

    #[test]
    fn empty_runs_write_only_a_header() {
        let content = write_to_string(&[]);
        assert_eq!(content.trim(), "date,advisor,portfolio_value_usd,cash");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let result = CsvReportAdapter::new().write(&[], "/nonexistent/dir/results.csv");
        assert!(result.is_err());
    }
}
