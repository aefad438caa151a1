#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use stockadvisor::domain::ohlcv::PriceBar;
use stockadvisor::domain::simulation::SimulationConfig;
use stockadvisor::ports::price_port::PricePort;

/// In-memory price store built bar by bar, independent of the CSV adapter.
pub struct MemoryPricePort {
    bars: HashMap<(String, NaiveDate), PriceBar>,
    open_dates: HashSet<NaiveDate>,
}

impl MemoryPricePort {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            open_dates: HashSet::new(),
        }
    }

    pub fn with_bar(mut self, bar: PriceBar) -> Self {
        self.open_dates.insert(bar.date);
        self.bars.insert((bar.ticker.clone(), bar.date), bar);
        self
    }

    pub fn with_bars(mut self, bars: Vec<PriceBar>) -> Self {
        for bar in bars {
            self = self.with_bar(bar);
        }
        self
    }
}

impl PricePort for MemoryPricePort {
    fn bar(&self, ticker: &str, date: NaiveDate) -> Option<PriceBar> {
        self.bars.get(&(ticker.to_string(), date)).cloned()
    }

    fn is_open(&self, date: NaiveDate) -> bool {
        self.open_dates.contains(&date)
    }

    fn latest_close_at_or_before(&self, ticker: &str, date: NaiveDate) -> Option<f64> {
        self.bars
            .iter()
            .filter(|((t, d), _)| t == ticker && *d <= date)
            .max_by_key(|((_, d), _)| *d)
            .map(|(_, bar)| bar.close)
    }
}

pub fn make_bar(ticker: &str, date: &str, open: f64, close: f64) -> PriceBar {
    PriceBar {
        ticker: ticker.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume: 1000,
    }
}

/// Flat bar: close equals open.
pub fn flat_bar(ticker: &str, date: &str, price: f64) -> PriceBar {
    make_bar(ticker, date, price, price)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_config(tickers: &[&str], advisors: &[&str]) -> SimulationConfig {
    let mut allocations = vec![("Cash".to_string(), 100.0 - 10.0 * tickers.len() as f64)];
    for ticker in tickers {
        allocations.push((ticker.to_string(), 10.0));
    }
    SimulationConfig {
        start_date: date(2024, 7, 10),
        end_date: date(2024, 7, 15),
        initial_value: 10_000.0,
        tickers: tickers.iter().map(|s| s.to_string()).collect(),
        allocations,
        advisors: advisors.iter().map(|s| s.to_string()).collect(),
    }
}

/// Generate daily bars walking from `start_price` by `step` per day.
pub fn generate_bars(
    ticker: &str,
    start_date: &str,
    count: usize,
    start_price: f64,
    step: f64,
) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let open = start_price + step * i as f64;
            PriceBar {
                ticker: ticker.to_string(),
                date: start + chrono::Duration::days(i as i64),
                open,
                high: open.max(open + step) + 1.0,
                low: open.min(open + step) - 1.0,
                close: open + step,
                volume: 1000,
            }
        })
        .collect()
}
