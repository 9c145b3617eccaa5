//! Clean, date-ordered price series.

use crate::domain::error::DcasimError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Non-empty sequence of positive prices with strictly increasing dates.
///
/// Only [`PriceSeries::from_points`] and
/// [`normalize`](crate::domain::normalize::normalize) construct one, so every
/// consumer may divide by a price without further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn from_points(points: Vec<PricePoint>) -> Result<Self, DcasimError> {
        if points.is_empty() {
            return Err(DcasimError::DataUnavailable {
                reason: "price series is empty".into(),
            });
        }
        for (i, point) in points.iter().enumerate() {
            if !(point.price.is_finite() && point.price > 0.0) {
                return Err(DcasimError::MalformedHistory {
                    reason: format!("non-positive price {} on {}", point.price, point.date),
                });
            }
            if i > 0 && points[i - 1].date >= point.date {
                return Err(DcasimError::MalformedHistory {
                    reason: format!("dates not strictly increasing at {}", point.date),
                });
            }
        }
        Ok(Self { points })
    }

    /// Bypasses validation so tests can feed the simulator bad prices.
    #[cfg(test)]
    pub(crate) fn from_points_unchecked(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> PricePoint {
        self.points[0]
    }

    pub fn last(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Index of the first point dated on or after `date`.
    pub fn index_on_or_after(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.points.partition_point(|p| p.date < date);
        (idx < self.points.len()).then_some(idx)
    }

    /// First point dated on or after `date` ("next available trading date").
    pub fn on_or_after(&self, date: NaiveDate) -> Option<PricePoint> {
        self.index_on_or_after(date).map(|i| self.points[i])
    }

    /// Points inside `[start, end]`, or `None` when the window holds none.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> Option<PriceSeries> {
        let points: Vec<PricePoint> = self
            .points
            .iter()
            .filter(|p| p.date >= start && p.date <= end)
            .copied()
            .collect();
        if points.is_empty() {
            None
        } else {
            Some(PriceSeries { points })
        }
    }
}
