//! CSV price data adapter.
//!
//! Loads the long-format historical dataset the acquisition step produces
//! (`date,ticker,open,close,high,low,volume`, one row per ticker per day) into
//! memory once, then serves read-only lookups. Column order in the file does
//! not matter; columns are resolved by header name.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::domain::error::StockAdvisorError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::price_port::PricePort;

pub struct CsvPriceAdapter {
    bars: HashMap<(String, NaiveDate), PriceBar>,
    /// Ascending, deduplicated bar dates per ticker, for at-or-before scans.
    dates_by_ticker: HashMap<String, Vec<NaiveDate>>,
    open_dates: HashSet<NaiveDate>,
}

impl CsvPriceAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StockAdvisorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| StockAdvisorError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_csv(&content)
    }

    pub fn from_csv(content: &str) -> Result<Self, StockAdvisorError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| StockAdvisorError::Data {
                reason: format!("CSV parse error: {}", e),
            })?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| StockAdvisorError::Data {
                    reason: format!("missing {} column", name),
                })
        };
        let date_col = column("date")?;
        let ticker_col = column("ticker")?;
        let open_col = column("open")?;
        let close_col = column("close")?;
        let high_col = column("high")?;
        let low_col = column("low")?;
        let volume_col = column("volume")?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| StockAdvisorError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let field = |index: usize, name: &str| {
                record.get(index).ok_or_else(|| StockAdvisorError::Data {
                    reason: format!("missing {} value", name),
                })
            };
            let number = |index: usize, name: &str| -> Result<f64, StockAdvisorError> {
                field(index, name)?
                    .parse()
                    .map_err(|e| StockAdvisorError::Data {
                        reason: format!("invalid {} value: {}", name, e),
                    })
            };

            let date = NaiveDate::parse_from_str(field(date_col, "date")?, "%Y-%m-%d").map_err(
                |e| StockAdvisorError::Data {
                    reason: format!("invalid date format: {}", e),
                },
            )?;

            bars.push(PriceBar {
                ticker: field(ticker_col, "ticker")?.to_string(),
                date,
                open: number(open_col, "open")?,
                high: number(high_col, "high")?,
                low: number(low_col, "low")?,
                close: number(close_col, "close")?,
                volume: field(volume_col, "volume")?.parse().map_err(|e| {
                    StockAdvisorError::Data {
                        reason: format!("invalid volume value: {}", e),
                    }
                })?,
            });
        }

        Ok(Self::from_bars(bars))
    }

    /// Build a store from already-parsed bars. Later duplicates of a
    /// (ticker, date) key replace earlier ones.
    pub fn from_bars(bars: Vec<PriceBar>) -> Self {
        let mut store = CsvPriceAdapter {
            bars: HashMap::new(),
            dates_by_ticker: HashMap::new(),
            open_dates: HashSet::new(),
        };

        for bar in bars {
            store.open_dates.insert(bar.date);
            store
                .dates_by_ticker
                .entry(bar.ticker.clone())
                .or_default()
                .push(bar.date);
            store.bars.insert((bar.ticker.clone(), bar.date), bar);
        }
        for dates in store.dates_by_ticker.values_mut() {
            dates.sort();
            dates.dedup();
        }

        store
    }

    /// All tickers in the dataset, sorted.
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.dates_by_ticker.keys().cloned().collect();
        tickers.sort();
        tickers
    }

    /// (first date, last date, bar count) for a ticker.
    pub fn data_range(&self, ticker: &str) -> Option<(NaiveDate, NaiveDate, usize)> {
        let dates = self.dates_by_ticker.get(ticker)?;
        Some((*dates.first()?, *dates.last()?, dates.len()))
    }
}

impl PricePort for CsvPriceAdapter {
    fn bar(&self, ticker: &str, date: NaiveDate) -> Option<PriceBar> {
        self.bars.get(&(ticker.to_string(), date)).cloned()
    }

    fn is_open(&self, date: NaiveDate) -> bool {
        self.open_dates.contains(&date)
    }

    fn latest_close_at_or_before(&self, ticker: &str, date: NaiveDate) -> Option<f64> {
        let dates = self.dates_by_ticker.get(ticker)?;
        let idx = dates.partition_point(|d| *d <= date);
        if idx == 0 {
            return None;
        }
        self.bars
            .get(&(ticker.to_string(), dates[idx - 1]))
            .map(|bar| bar.close)
    }
}
