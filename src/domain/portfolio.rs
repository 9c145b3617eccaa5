//! Weighted buy-and-hold portfolio allocation.
//!
//! Each holding is normalized to its price on the first date every holding
//! trades, scaled by its weight, and summed into one value curve. There is no
//! rebalancing: weights drift with prices after the first date.

use crate::domain::error::DcasimError;
use crate::domain::metrics::{annualized_std, max_drawdown_pct, TRADING_DAYS_PER_YEAR};
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Annual risk-free rate subtracted in the portfolio Sharpe ratio.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub ticker: String,
    /// Fraction of the portfolio (0.4 means 40%).
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Percent units, except `sharpe_ratio`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPerformance {
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    pub volatility_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
}

/// Parses a comma-separated list of percentages into fractions.
pub fn parse_weights(input: &str) -> Result<Vec<f64>, DcasimError> {
    input
        .split(',')
        .map(|token| {
            let trimmed = token.trim();
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .map(|w| w / 100.0)
                .ok_or_else(|| DcasimError::InvalidStrategy {
                    reason: format!("invalid weight '{}'", trimmed),
                })
        })
        .collect()
}

/// Pairs tickers with weights by position.
pub fn build_allocations(
    tickers: &[String],
    weights: &[f64],
) -> Result<Vec<Allocation>, DcasimError> {
    if tickers.len() != weights.len() {
        return Err(DcasimError::InvalidStrategy {
            reason: format!(
                "{} tickers but {} weights",
                tickers.len(),
                weights.len()
            ),
        });
    }
    if tickers.is_empty() {
        return Err(DcasimError::InvalidStrategy {
            reason: "portfolio has no holdings".into(),
        });
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(DcasimError::InvalidStrategy {
            reason: "weights must not all be zero".into(),
        });
    }
    if (total - 1.0).abs() > 1e-9 {
        tracing::warn!(total_pct = total * 100.0, "portfolio weights do not sum to 100%");
    }

    Ok(tickers
        .iter()
        .zip(weights)
        .map(|(ticker, &weight)| Allocation {
            ticker: ticker.clone(),
            weight,
        })
        .collect())
}

/// Weighted sum of each series relative to its first common price.
///
/// Only dates present in every series are kept.
pub fn portfolio_curve(
    holdings: &[(f64, &PriceSeries)],
) -> Result<Vec<PortfolioPoint>, DcasimError> {
    let Some((_, first)) = holdings.first() else {
        return Err(DcasimError::InvalidStrategy {
            reason: "portfolio has no holdings".into(),
        });
    };

    let lookups: Vec<HashMap<NaiveDate, f64>> = holdings
        .iter()
        .map(|(_, series)| series.points().iter().map(|p| (p.date, p.price)).collect())
        .collect();
    let dates: Vec<NaiveDate> = first
        .points()
        .iter()
        .map(|p| p.date)
        .filter(|d| lookups.iter().all(|prices| prices.contains_key(d)))
        .collect();

    let Some(base_date) = dates.first() else {
        return Err(DcasimError::DataUnavailable {
            reason: "holdings share no trading dates".into(),
        });
    };
    let bases: Vec<f64> = lookups.iter().map(|prices| prices[base_date]).collect();

    Ok(dates
        .iter()
        .map(|date| PortfolioPoint {
            date: *date,
            value: holdings
                .iter()
                .zip(&lookups)
                .zip(&bases)
                .map(|(((weight, _), prices), base)| weight * prices[date] / base)
                .sum(),
        })
        .collect())
}

/// Buy-and-hold statistics of a value curve. Fewer than two points give zeros.
pub fn portfolio_performance(curve: &[PortfolioPoint], risk_free_rate: f64) -> PortfolioPerformance {
    let n = curve.len();
    if n < 2 || curve[0].value <= 0.0 {
        return PortfolioPerformance {
            total_return_pct: 0.0,
            annualized_return_pct: 0.0,
            volatility_pct: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown_pct: 0.0,
        };
    }

    let values: Vec<f64> = curve.iter().map(|p| p.value).collect();
    let total = values[n - 1] / values[0] - 1.0;
    let annual = (1.0 + total).powf(TRADING_DAYS_PER_YEAR / n as f64) - 1.0;

    let returns: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();
    let volatility = annualized_std(&returns);
    let sharpe_ratio = if volatility > 0.0 {
        (annual - risk_free_rate) / volatility
    } else {
        0.0
    };

    PortfolioPerformance {
        total_return_pct: total * 100.0,
        annualized_return_pct: annual * 100.0,
        volatility_pct: volatility * 100.0,
        sharpe_ratio,
        max_drawdown_pct: max_drawdown_pct(&values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PricePoint;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn series(rows: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::from_points(
            rows.iter()
                .map(|&(day, price)| PricePoint { date: d(day), price })
                .collect(),
        )
        .unwrap()
    }

    fn curve(values: &[f64]) -> Vec<PortfolioPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| PortfolioPoint {
                date: d(i as u32 + 1),
                value,
            })
            .collect()
    }

    #[test]
    fn parse_weights_percentages() {
        let weights = parse_weights("40, 30,30").unwrap();
        assert_eq!(weights.len(), 3);
        assert!((weights[0] - 0.4).abs() < 1e-12);
        assert!((weights[2] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn parse_weights_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_weights("40,abc"),
            Err(DcasimError::InvalidStrategy { .. })
        ));
        assert!(matches!(
            parse_weights("50,-10"),
            Err(DcasimError::InvalidStrategy { .. })
        ));
    }

    #[test]
    fn allocations_require_matching_counts() {
        let tickers = vec!["PTT.BK".to_string(), "AOT.BK".to_string()];
        let err = build_allocations(&tickers, &[1.0]).unwrap_err();
        assert!(matches!(err, DcasimError::InvalidStrategy { .. }));
    }

    #[test]
    fn allocations_reject_all_zero_weights() {
        let tickers = vec!["PTT.BK".to_string()];
        assert!(build_allocations(&tickers, &[0.0]).is_err());
    }

    #[test]
    fn allocations_pair_by_position() {
        let tickers = vec!["PTT.BK".to_string(), "AOT.BK".to_string()];
        let allocs = build_allocations(&tickers, &[0.6, 0.4]).unwrap();
        assert_eq!(allocs[1].ticker, "AOT.BK");
        assert!((allocs[1].weight - 0.4).abs() < 1e-12);
    }

    #[test]
    fn curve_weights_normalized_prices() {
        let a = series(&[(1, 100.0), (2, 110.0), (3, 120.0)]);
        let b = series(&[(1, 50.0), (2, 50.0), (3, 40.0)]);

        let points = portfolio_curve(&[(0.5, &a), (0.5, &b)]).unwrap();

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert!((values[0] - 1.0).abs() < 1e-12);
        assert!((values[1] - 1.05).abs() < 1e-12);
        assert!((values[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn curve_keeps_common_dates_only() {
        let a = series(&[(1, 10.0), (2, 11.0), (4, 12.0), (5, 13.0)]);
        let b = series(&[(2, 20.0), (3, 21.0), (4, 22.0)]);

        let points = portfolio_curve(&[(0.7, &a), (0.3, &b)]).unwrap();

        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2), d(4)]);
        assert!((points[0].value - 1.0).abs() < 1e-12);
        assert!((points[1].value - (0.7 * 12.0 / 11.0 + 0.3 * 22.0 / 20.0)).abs() < 1e-12);
    }

    #[test]
    fn curve_without_shared_dates_is_data_unavailable() {
        let a = series(&[(1, 10.0)]);
        let b = series(&[(2, 20.0)]);
        let err = portfolio_curve(&[(0.5, &a), (0.5, &b)]).unwrap_err();
        assert!(matches!(err, DcasimError::DataUnavailable { .. }));
    }

    #[test]
    fn performance_known_values() {
        let perf = portfolio_performance(&curve(&[1.0, 1.1, 0.99]), DEFAULT_RISK_FREE_RATE);

        let annual = 0.99_f64.powf(252.0 / 3.0) - 1.0;
        let vol = 0.02_f64.sqrt() * 252.0_f64.sqrt();
        assert!((perf.total_return_pct - (-1.0)).abs() < 1e-9);
        assert!((perf.annualized_return_pct - annual * 100.0).abs() < 1e-6);
        assert!((perf.volatility_pct - vol * 100.0).abs() < 1e-9);
        assert!((perf.sharpe_ratio - (annual - 0.02) / vol).abs() < 1e-6);
        assert!((perf.max_drawdown_pct - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn performance_flat_curve_has_zero_risk() {
        let perf = portfolio_performance(&curve(&[1.0; 10]), DEFAULT_RISK_FREE_RATE);
        assert_eq!(perf.total_return_pct, 0.0);
        assert_eq!(perf.volatility_pct, 0.0);
        assert_eq!(perf.sharpe_ratio, 0.0);
    }

    #[test]
    fn performance_single_point_is_zero() {
        let perf = portfolio_performance(&curve(&[1.0]), DEFAULT_RISK_FREE_RATE);
        assert_eq!(perf.annualized_return_pct, 0.0);
        assert_eq!(perf.max_drawdown_pct, 0.0);
    }
}
