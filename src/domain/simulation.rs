//! Simulation driver: walks the trading calendar per advisor.

use chrono::NaiveDate;
use log::{info, warn};
use rayon::prelude::*;

use super::advisor::advisor_by_id;
use super::allocation::{shares_for_allocations, validate_allocations};
use super::applier::apply_recommendation;
use super::error::StockAdvisorError;
use super::holdings::Holdings;
use super::rounding::round_usd;
use super::snapshot::{Snapshot, TickerState, SimulationRun};
use crate::ports::price_port::PricePort;

/// Everything one invocation of the simulator needs. `tickers` is in input
/// order; that order fixes report columns and advisor tie-breaks.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_value: f64,
    pub tickers: Vec<String>,
    pub allocations: Vec<(String, f64)>,
    pub advisors: Vec<String>,
}

/// One advisor's run that did not complete, with the reason.
#[derive(Debug)]
pub struct FailedRun {
    pub advisor: String,
    pub error: StockAdvisorError,
}

/// The union of whatever runs succeeded, plus explicit per-advisor failures.
/// One misconfigured strategy never aborts the others.
#[derive(Debug)]
pub struct SimulationOutcome {
    pub runs: Vec<SimulationRun>,
    pub failures: Vec<FailedRun>,
}

/// Run every configured advisor over the date range.
///
/// Allocation validation happens once, up front, and blocks all runs when it
/// fails. The advisor runs themselves share only the read-only price store, so
/// they execute in parallel; each run owns its holdings and snapshot sequence.
pub fn run_simulation(
    store: &dyn PricePort,
    config: &SimulationConfig,
) -> Result<SimulationOutcome, StockAdvisorError> {
    validate_allocations(&config.allocations)?;

    let results: Vec<(String, Result<SimulationRun, StockAdvisorError>)> = config
        .advisors
        .par_iter()
        .map(|id| (id.clone(), run_advisor(store, config, id)))
        .collect();

    let mut runs = Vec::new();
    let mut failures = Vec::new();
    for (advisor, result) in results {
        match result {
            Ok(run) => runs.push(run),
            Err(error) => {
                warn!("advisor {advisor} failed: {error}");
                failures.push(FailedRun { advisor, error });
            }
        }
    }

    Ok(SimulationOutcome { runs, failures })
}

/// One advisor's full simulation: seed holdings from the allocations, emit the
/// initial snapshot, then one snapshot per calendar day after the start date —
/// a trading snapshot when the dataset has bars for the day, a carried-forward
/// copy when the market was closed.
pub fn run_advisor(
    store: &dyn PricePort,
    config: &SimulationConfig,
    advisor_id: &str,
) -> Result<SimulationRun, StockAdvisorError> {
    let advisor = advisor_by_id(advisor_id).ok_or_else(|| StockAdvisorError::UnknownAdvisor {
        name: advisor_id.to_string(),
    })?;

    let mut holdings = shares_for_allocations(
        store,
        &config.allocations,
        config.initial_value,
        config.start_date,
    )?;
    let initial_holdings = holdings.clone();

    let mut snapshots = vec![initial_snapshot(store, config, advisor_id, &holdings)];

    let mut date = config.start_date;
    while let Some(next_day) = date.succ_opt() {
        if next_day > config.end_date {
            break;
        }
        date = next_day;

        if !store.is_open(date) {
            let carried = snapshots[snapshots.len() - 1].carried_forward(date);
            snapshots.push(carried);
            continue;
        }

        let rec = advisor.recommend(&holdings, &config.tickers, date, store)?;
        let (next_holdings, total_value_usd) = apply_recommendation(store, date, &rec);
        holdings = next_holdings;
        snapshots.push(trading_snapshot(
            store,
            date,
            advisor_id,
            total_value_usd,
            &holdings,
            &config.tickers,
        ));
    }

    info!(
        "advisor {advisor_id}: {} snapshots, final value {:.2}",
        snapshots.len(),
        snapshots[snapshots.len() - 1].total_value_usd
    );

    Ok(SimulationRun {
        advisor: advisor_id.to_string(),
        initial_holdings,
        snapshots,
    })
}

/// Day-0 row. Priced at the most recent close at or before the start date —
/// the same prices the allocation converter used. The total is recomputed
/// from the seeded holdings, not echoed from the configured value: share
/// rounding during seeding can lose a few cents, and the total must equal
/// cash plus the priced positions on this row like every other.
fn initial_snapshot(
    store: &dyn PricePort,
    config: &SimulationConfig,
    advisor_id: &str,
    holdings: &Holdings,
) -> Snapshot {
    let mut total_value_usd = holdings.cash;
    let positions: Vec<TickerState> = config
        .tickers
        .iter()
        .map(|ticker| {
            let quantity = holdings.quantity(ticker);
            let close = store.latest_close_at_or_before(ticker, config.start_date);
            if let Some(c) = close {
                total_value_usd += quantity * c;
            }
            TickerState {
                ticker: ticker.clone(),
                quantity,
                close,
                value_usd: close.map(|c| round_usd(quantity * c)),
            }
        })
        .collect();

    Snapshot {
        date: config.start_date,
        advisor: advisor_id.to_string(),
        is_initial: true,
        total_value_usd: round_usd(total_value_usd),
        cash: holdings.cash,
        positions,
    }
}

fn trading_snapshot(
    store: &dyn PricePort,
    date: NaiveDate,
    advisor_id: &str,
    total_value_usd: f64,
    holdings: &Holdings,
    tickers: &[String],
) -> Snapshot {
    let positions = tickers
        .iter()
        .map(|ticker| {
            let quantity = holdings.quantity(ticker);
            let close = store.bar(ticker, date).map(|bar| bar.close);
            TickerState {
                ticker: ticker.clone(),
                quantity,
                close,
                value_usd: close.map(|c| round_usd(quantity * c)),
            }
        })
        .collect();

    Snapshot {
        date,
        advisor: advisor_id.to_string(),
        is_initial: false,
        total_value_usd,
        cash: holdings.cash,
        positions,
    }
}
