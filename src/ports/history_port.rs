//! Price-history access port.

use crate::domain::error::DcasimError;
use crate::domain::raw_history::RawHistory;
use chrono::NaiveDate;

/// Source of raw price history.
///
/// Implementations may return an empty or partially null table; turning that
/// into a usable series (or `DataUnavailable`) is the normalizer's job.
pub trait HistoryPort {
    fn get_history(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawHistory, DcasimError>;

    fn list_tickers(&self) -> Result<Vec<String>, DcasimError>;
}
