//! Multi-ticker universe for side-by-side comparisons.
//!
//! Parses ticker lists from configuration or the command line and loads a
//! normalized price series for each, skipping tickers without usable data.

use crate::domain::error::DcasimError;
use crate::domain::normalize::normalize;
use crate::domain::price_series::PriceSeries;
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[derive(Debug, Clone)]
pub struct LoadedTicker {
    pub ticker: String,
    pub series: PriceSeries,
}

#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct UniverseLoadResult {
    pub loaded: Vec<LoadedTicker>,
    pub skipped: Vec<SkippedTicker>,
}

/// Fetches and normalizes every ticker, keeping going past failures.
///
/// Fails with `DataUnavailable` only when no ticker yields a series.
pub fn load_universe<S: AsRef<str>>(
    port: &dyn HistoryPort,
    tickers: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
    price_fields: &[S],
) -> Result<UniverseLoadResult, DcasimError> {
    let mut loaded = Vec::new();
    let mut skipped = Vec::new();

    for ticker in tickers {
        let series = port
            .get_history(ticker, start_date, end_date)
            .and_then(|raw| normalize(&raw, price_fields));
        match series {
            Ok(series) => {
                eprintln!("  {}: {} prices [OK]", ticker, series.len());
                loaded.push(LoadedTicker {
                    ticker: ticker.clone(),
                    series,
                });
            }
            Err(e) => {
                eprintln!("Warning: skipping {} ({})", ticker, e);
                skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    if loaded.is_empty() {
        return Err(DcasimError::DataUnavailable {
            reason: format!("none of {} tickers returned usable prices", tickers.len()),
        });
    }

    Ok(UniverseLoadResult { loaded, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tickers_basic() {
        let result = parse_tickers("PTT.BK,AOT.BK,AAPL").unwrap();
        assert_eq!(result, vec!["PTT.BK", "AOT.BK", "AAPL"]);
    }

    #[test]
    fn parse_tickers_trims_and_uppercases() {
        let result = parse_tickers("  ptt.bk , scb.bk ").unwrap();
        assert_eq!(result, vec!["PTT.BK", "SCB.BK"]);
    }

    #[test]
    fn parse_tickers_empty_token() {
        let result = parse_tickers("PTT.BK,,AOT.BK");
        assert!(matches!(result, Err(UniverseError::EmptyToken)));
    }

    #[test]
    fn parse_tickers_duplicate() {
        let result = parse_tickers("PTT.BK,AOT.BK,ptt.bk");
        assert!(matches!(result, Err(UniverseError::DuplicateTicker(s)) if s == "PTT.BK"));
    }
}
