//! CSV file history adapter.
//!
//! Reads one `<TICKER>.csv` per ticker with a header row. The first column is
//! the date; every other column is loaded as a nullable numeric field, so a
//! Yahoo-style `Date,Open,High,Low,Close,Adj Close,Volume` export works as is.

use crate::domain::error::DcasimError;
use crate::domain::raw_history::RawHistory;
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvHistoryAdapter {
    base_path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(value: &str) -> Result<NaiveDate, DcasimError> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| DcasimError::DataSource {
        reason: format!("invalid date '{}': {}", value, e),
    })
}

fn parse_value(value: &str, column: &str) -> Result<Option<f64>, DcasimError> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
    {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|e| DcasimError::DataSource {
            reason: format!("invalid {} value '{}': {}", column, value, e),
        })
}

impl HistoryPort for CsvHistoryAdapter {
    fn get_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawHistory, DcasimError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| DcasimError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| DcasimError::DataSource {
                reason: format!("CSV header error: {}", e),
            })?
            .iter()
            .skip(1)
            .map(|h| h.trim().to_string())
            .collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];

        for result in rdr.records() {
            let record = result.map_err(|e| DcasimError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| DcasimError::DataSource {
                reason: "missing date column".into(),
            })?;
            let date = parse_date(date_str)?;
            if date < start_date || date > end_date {
                continue;
            }

            for (i, name) in headers.iter().enumerate() {
                let value = match record.get(i + 1) {
                    Some(raw) => parse_value(raw, name)?,
                    None => None,
                };
                columns[i].push(value);
            }
            dates.push(date);
        }

        tracing::debug!(ticker, rows = dates.len(), "loaded price history from csv");

        let mut history = RawHistory::new(dates);
        for (name, values) in headers.into_iter().zip(columns) {
            history.add_column(name, values)?;
        }
        Ok(history)
    }

    fn list_tickers(&self) -> Result<Vec<String>, DcasimError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| DcasimError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DcasimError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
