//! Raw history to [`PriceSeries`] normalization.

use crate::domain::error::DcasimError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::raw_history::{RawColumn, RawHistory};
use chrono::NaiveDate;

/// Field order tried when the caller has no preference.
pub const DEFAULT_PRICE_FIELDS: [&str; 2] = ["Adj Close", "Close"];

/// Builds a clean price series from the first usable field in
/// `price_field_priority`.
///
/// Rows are ordered by date with the last duplicate winning. Gaps are
/// forward-filled then back-filled; non-positive prices are dropped.
pub fn normalize<S: AsRef<str>>(
    raw: &RawHistory,
    price_field_priority: &[S],
) -> Result<PriceSeries, DcasimError> {
    if raw.is_empty() {
        return Err(DcasimError::DataUnavailable {
            reason: "price history is empty".into(),
        });
    }

    let column = select_field(raw, price_field_priority).ok_or_else(|| {
        let wanted: Vec<&str> = price_field_priority.iter().map(|s| s.as_ref()).collect();
        DcasimError::DataUnavailable {
            reason: format!("no non-null values in fields [{}]", wanted.join(", ")),
        }
    })?;

    let rows = dedupe_last_wins(raw.index(), &column.values);
    let dates: Vec<NaiveDate> = rows.iter().map(|(d, _)| *d).collect();
    let mut values: Vec<Option<f64>> = rows.iter().map(|(_, v)| *v).collect();
    forward_fill(&mut values);
    backward_fill(&mut values);

    let mut points = Vec::with_capacity(dates.len());
    let mut dropped = 0usize;
    for (date, value) in dates.into_iter().zip(values) {
        match value {
            Some(price) if price > 0.0 => points.push(PricePoint { date, price }),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(field = %column.name, dropped, "dropped unusable price rows");
    }

    if points.is_empty() {
        return Err(DcasimError::DataUnavailable {
            reason: format!("no positive prices in field '{}'", column.name),
        });
    }
    PriceSeries::from_points(points)
}

fn is_usable(value: &Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite())
}

fn select_field<'a, S: AsRef<str>>(raw: &'a RawHistory, priority: &[S]) -> Option<&'a RawColumn> {
    priority
        .iter()
        .filter_map(|name| raw.column(name.as_ref()))
        .find(|column| column.values.iter().any(is_usable))
}

/// Sorts rows by date (stable) and keeps the last row for each date.
fn dedupe_last_wins(index: &[NaiveDate], values: &[Option<f64>]) -> Vec<(NaiveDate, Option<f64>)> {
    let mut rows: Vec<(NaiveDate, Option<f64>)> = index
        .iter()
        .copied()
        .zip(values.iter().map(|v| v.filter(|x| x.is_finite())))
        .collect();
    rows.sort_by_key(|(date, _)| *date);

    let mut deduped: Vec<(NaiveDate, Option<f64>)> = Vec::with_capacity(rows.len());
    for row in rows {
        match deduped.last_mut() {
            Some(last) if last.0 == row.0 => *last = row,
            _ => deduped.push(row),
        }
    }
    deduped
}

fn forward_fill(values: &mut [Option<f64>]) {
    let mut carry = None;
    for value in values.iter_mut() {
        match value {
            Some(v) => carry = Some(*v),
            None => *value = carry,
        }
    }
}

fn backward_fill(values: &mut [Option<f64>]) {
    let mut carry = None;
    for value in values.iter_mut().rev() {
        match value {
            Some(v) => carry = Some(*v),
            None => *value = carry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn history(dates: Vec<NaiveDate>, field: &str, values: Vec<Option<f64>>) -> RawHistory {
        RawHistory::new(dates).with_column(field, values).unwrap()
    }

    #[test]
    fn empty_history_is_unavailable() {
        let raw = RawHistory::new(vec![]);
        let result = normalize(&raw, &DEFAULT_PRICE_FIELDS);
        assert!(matches!(result, Err(DcasimError::DataUnavailable { .. })));
    }

    #[test]
    fn prefers_first_field_with_values() {
        let raw = RawHistory::new(vec![d(2), d(3)])
            .with_column("Close", vec![Some(10.0), Some(11.0)])
            .unwrap()
            .with_column("Adj Close", vec![Some(9.5), Some(10.5)])
            .unwrap();
        let series = normalize(&raw, &DEFAULT_PRICE_FIELDS).unwrap();
        assert_eq!(series.prices(), vec![9.5, 10.5]);
    }

    #[test]
    fn falls_back_when_preferred_field_all_null() {
        let raw = RawHistory::new(vec![d(2), d(3)])
            .with_column("Adj Close", vec![None, None])
            .unwrap()
            .with_column("Close", vec![Some(10.0), Some(11.0)])
            .unwrap();
        let series = normalize(&raw, &DEFAULT_PRICE_FIELDS).unwrap();
        assert_eq!(series.prices(), vec![10.0, 11.0]);
    }

    #[test]
    fn no_candidate_field_is_unavailable() {
        let raw = history(vec![d(2)], "Open", vec![Some(10.0)]);
        let result = normalize(&raw, &DEFAULT_PRICE_FIELDS);
        assert!(matches!(result, Err(DcasimError::DataUnavailable { .. })));
    }

    #[test]
    fn nan_only_field_is_treated_as_null() {
        let raw = history(vec![d(2), d(3)], "Close", vec![Some(f64::NAN), None]);
        let result = normalize(&raw, &["Close"]);
        assert!(matches!(result, Err(DcasimError::DataUnavailable { .. })));
    }

    #[test]
    fn forward_fill_then_backward_fill() {
        let raw = history(
            vec![d(2), d(3), d(4), d(5), d(8)],
            "Close",
            vec![None, Some(10.0), None, Some(12.0), None],
        );
        let series = normalize(&raw, &["Close"]).unwrap();
        assert_eq!(series.prices(), vec![10.0, 10.0, 10.0, 12.0, 12.0]);
        assert_eq!(series.len(), 5);
    }

    #[test]
    fn sorts_and_last_duplicate_wins() {
        let raw = history(
            vec![d(4), d(2), d(3), d(2)],
            "Close",
            vec![Some(14.0), Some(1.0), Some(13.0), Some(12.0)],
        );
        let series = normalize(&raw, &["Close"]).unwrap();
        let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2), d(3), d(4)]);
        assert_eq!(series.prices(), vec![12.0, 13.0, 14.0]);
    }

    #[test]
    fn drops_non_positive_prices() {
        let raw = history(
            vec![d(2), d(3), d(4)],
            "Close",
            vec![Some(10.0), Some(0.0), Some(-1.0)],
        );
        let series = normalize(&raw, &["Close"]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.first().date, d(2));
    }

    #[test]
    fn all_non_positive_is_unavailable() {
        let raw = history(vec![d(2), d(3)], "Close", vec![Some(0.0), Some(-2.0)]);
        let result = normalize(&raw, &["Close"]);
        assert!(matches!(result, Err(DcasimError::DataUnavailable { .. })));
    }

    #[test]
    fn input_is_not_modified() {
        let raw = history(vec![d(3), d(2)], "Close", vec![None, Some(5.0)]);
        let before = raw.clone();
        let _ = normalize(&raw, &["Close"]).unwrap();
        assert_eq!(raw, before);
    }
}
