//! Configuration validation: INI sections to a typed [`SimulationConfig`].
//!
//! Validates field by field before any run starts; allocation sums are checked
//! here too, so a bad config never reaches the simulation driver.

use chrono::NaiveDate;
use std::collections::HashSet;

use super::advisor::{advisor_by_id, ADVISOR_IDS};
use super::allocation::{validate_allocations, CASH_KEY};
use super::error::StockAdvisorError;
use super::simulation::SimulationConfig;
use crate::ports::config_port::ConfigPort;

/// Build and validate a [`SimulationConfig`] from the `[simulation]` and
/// `[allocations]` config sections.
pub fn validate_simulation_config(
    config: &dyn ConfigPort,
) -> Result<SimulationConfig, StockAdvisorError> {
    let start_date = parse_date(config, "start_date")?;
    let end_date = parse_date(config, "end_date")?;
    if start_date > end_date {
        return Err(StockAdvisorError::ConfigInvalid {
            section: "simulation".into(),
            key: "start_date".into(),
            reason: "start_date must not be after end_date".into(),
        });
    }

    let initial_value = config.get_double("simulation", "initial_value").ok_or_else(|| {
        StockAdvisorError::ConfigMissing {
            section: "simulation".into(),
            key: "initial_value".into(),
        }
    })?;
    if initial_value <= 0.0 {
        return Err(StockAdvisorError::ConfigInvalid {
            section: "simulation".into(),
            key: "initial_value".into(),
            reason: "initial_value must be positive".into(),
        });
    }

    let tickers = parse_tickers(&require_string(config, "simulation", "tickers")?)?;
    let advisors = parse_advisors(&require_string(config, "simulation", "advisors")?)?;

    let mut allocations = vec![(CASH_KEY.to_string(), require_allocation(config, CASH_KEY)?)];
    for ticker in &tickers {
        allocations.push((ticker.clone(), require_allocation(config, ticker)?));
    }
    validate_allocations(&allocations)?;

    Ok(SimulationConfig {
        start_date,
        end_date,
        initial_value,
        tickers,
        allocations,
        advisors,
    })
}

/// Parse a comma-separated ticker list: trimmed, uppercased, no empty tokens,
/// no duplicates. `CASH` is reserved for the allocation entry and rejected.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, StockAdvisorError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let ticker = token.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(invalid_list("tickers", "empty token in ticker list"));
        }
        if ticker == "CASH" {
            return Err(invalid_list("tickers", "Cash is a reserved name, not a ticker"));
        }
        if !seen.insert(ticker.clone()) {
            return Err(invalid_list("tickers", &format!("duplicate ticker: {ticker}")));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// Parse a comma-separated advisor list against the registry.
pub fn parse_advisors(input: &str) -> Result<Vec<String>, StockAdvisorError> {
    let mut advisors = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let id = token.trim().to_lowercase();
        if id.is_empty() {
            return Err(invalid_list("advisors", "empty token in advisor list"));
        }
        if advisor_by_id(&id).is_none() {
            return Err(invalid_list(
                "advisors",
                &format!("unknown advisor {id}, expected one of: {}", ADVISOR_IDS.join(", ")),
            ));
        }
        if !seen.insert(id.clone()) {
            return Err(invalid_list("advisors", &format!("duplicate advisor: {id}")));
        }
        advisors.push(id);
    }

    Ok(advisors)
}

fn invalid_list(key: &str, reason: &str) -> StockAdvisorError {
    StockAdvisorError::ConfigInvalid {
        section: "simulation".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

fn require_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, StockAdvisorError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(StockAdvisorError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        }),
    }
}

fn require_allocation(config: &dyn ConfigPort, key: &str) -> Result<f64, StockAdvisorError> {
    config
        .get_double("allocations", key)
        .ok_or_else(|| StockAdvisorError::ConfigMissing {
            section: "allocations".into(),
            key: key.into(),
        })
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, StockAdvisorError> {
    let value = require_string(config, "simulation", key)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| StockAdvisorError::ConfigInvalid {
        section: "simulation".into(),
        key: key.into(),
        reason: format!("invalid {key} format, expected YYYY-MM-DD"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const VALID_INI: &str = r#"
[data]
csv_path = data.csv

[simulation]
start_date = 2024-07-10
end_date = 2024-07-18
initial_value = 1000
tickers = AAPL,NVDA
advisors = always_cash,always_hold

[allocations]
Cash = 0
AAPL = 50
NVDA = 50
"#;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config_builds() {
        let config = validate_simulation_config(&adapter(VALID_INI)).unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2024, 7, 18).unwrap());
        assert_eq!(config.initial_value, 1000.0);
        assert_eq!(config.tickers, vec!["AAPL", "NVDA"]);
        assert_eq!(config.advisors, vec!["always_cash", "always_hold"]);
        assert_eq!(
            config.allocations,
            vec![
                ("Cash".to_string(), 0.0),
                ("AAPL".to_string(), 50.0),
                ("NVDA".to_string(), 50.0),
            ]
        );
    }

    #[test]
    fn missing_start_date() {
        let ini = VALID_INI.replace("start_date = 2024-07-10\n", "");
        let result = validate_simulation_config(&adapter(&ini));
        assert!(matches!(
            result,
            Err(StockAdvisorError::ConfigMissing { ref key, .. }) if key == "start_date"
        ));
    }

    #[test]
    fn reversed_dates() {
        let ini = VALID_INI.replace("end_date = 2024-07-18", "end_date = 2024-07-01");
        let result = validate_simulation_config(&adapter(&ini));
        assert!(matches!(result, Err(StockAdvisorError::ConfigInvalid { .. })));
    }

    #[test]
    fn non_positive_initial_value() {
        let ini = VALID_INI.replace("initial_value = 1000", "initial_value = 0");
        let result = validate_simulation_config(&adapter(&ini));
        assert!(matches!(
            result,
            Err(StockAdvisorError::ConfigInvalid { ref key, .. }) if key == "initial_value"
        ));
    }

    #[test]
    fn allocation_sum_must_be_hundred() {
        let ini = VALID_INI.replace("NVDA = 50", "NVDA = 40");
        let result = validate_simulation_config(&adapter(&ini));
        assert!(matches!(
            result,
            Err(StockAdvisorError::InvalidAllocation { .. })
        ));
    }

    #[test]
    fn missing_allocation_for_a_ticker() {
        let ini = VALID_INI.replace("NVDA = 50\n", "");
        let result = validate_simulation_config(&adapter(&ini));
        assert!(matches!(
            result,
            Err(StockAdvisorError::ConfigMissing { ref section, .. }) if section == "allocations"
        ));
    }

    #[test]
    fn parse_tickers_basic() {
        assert_eq!(parse_tickers("AAPL,NVDA").unwrap(), vec!["AAPL", "NVDA"]);
        assert_eq!(parse_tickers(" aapl , nvda ").unwrap(), vec!["AAPL", "NVDA"]);
    }

    #[test]
    fn parse_tickers_rejects_bad_lists() {
        assert!(parse_tickers("AAPL,,NVDA").is_err());
        assert!(parse_tickers("AAPL,AAPL").is_err());
        assert!(parse_tickers("AAPL,Cash").is_err());
    }

    #[test]
    fn parse_advisors_checks_the_registry() {
        assert_eq!(
            parse_advisors("always_cash, dory").unwrap(),
            vec!["always_cash", "dory"]
        );
        assert!(parse_advisors("always_cash,marlin").is_err());
        assert!(parse_advisors("dory,dory").is_err());
    }

    #[test]
    fn single_day_range_is_allowed() {
        let ini = VALID_INI.replace("end_date = 2024-07-18", "end_date = 2024-07-10");
        assert!(validate_simulation_config(&adapter(&ini)).is_ok());
    }
}
