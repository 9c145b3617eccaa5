#![allow(dead_code)]

use chrono::{Duration, Months, NaiveDate};
use dcasim::domain::error::DcasimError;
use dcasim::domain::raw_history::RawHistory;
use dcasim::ports::history_port::HistoryPort;
use std::cell::Cell;
use std::collections::HashMap;
use std::io::Write;

pub struct MockHistoryPort {
    pub data: HashMap<String, RawHistory>,
    pub errors: HashMap<String, String>,
    pub calls: Cell<usize>,
}

impl MockHistoryPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_history(mut self, ticker: &str, history: RawHistory) -> Self {
        self.data.insert(ticker.to_string(), history);
        self
    }

    /// Single `Close` column over `(date, price)` rows.
    pub fn with_closes(self, ticker: &str, rows: &[(NaiveDate, f64)]) -> Self {
        self.with_history(ticker, close_history(rows))
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl HistoryPort for MockHistoryPort {
    fn get_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawHistory, DcasimError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DcasimError::DataSource {
                reason: reason.clone(),
            });
        }
        let Some(full) = self.data.get(ticker) else {
            return Ok(RawHistory::default());
        };

        let keep: Vec<usize> = full
            .index()
            .iter()
            .enumerate()
            .filter(|(_, d)| **d >= start_date && **d <= end_date)
            .map(|(i, _)| i)
            .collect();
        let index = keep.iter().map(|&i| full.index()[i]).collect();
        let mut history = RawHistory::new(index);
        for name in full.column_names() {
            let values = full.column(name).unwrap().values.clone();
            history
                .add_column(name, keep.iter().map(|&i| values[i]).collect())
                .unwrap();
        }
        Ok(history)
    }

    fn list_tickers(&self) -> Result<Vec<String>, DcasimError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn close_history(rows: &[(NaiveDate, f64)]) -> RawHistory {
    RawHistory::new(rows.iter().map(|(d, _)| *d).collect())
        .with_column("Close", rows.iter().map(|(_, p)| Some(*p)).collect())
        .unwrap()
}

/// One row on the 1st of each month, starting at `start`.
pub fn monthly_rows(start: NaiveDate, prices: &[f64]) -> Vec<(NaiveDate, f64)> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (start + Months::new(i as u32), p))
        .collect()
}

/// One row per calendar day, starting at `start`.
pub fn daily_rows(start: NaiveDate, prices: &[f64]) -> Vec<(NaiveDate, f64)> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (start + Duration::days(i as i64), p))
        .collect()
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
