//! Performance metrics over a simulation ledger.

use super::ledger::Ledger;
use super::price_series::PriceSeries;
use chrono::NaiveDate;

pub(crate) const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Standard deviations below this are rounding noise from share arithmetic.
const STDDEV_EPSILON: f64 = 1e-12;

/// All percentages are in percent units (12.5 means 12.5%).
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    pub volatility_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
}

impl PerformanceMetrics {
    /// Never fails: degenerate ledgers resolve to zeros.
    pub fn compute(ledger: &Ledger) -> Self {
        let values = ledger.portfolio_values();
        let invested: Vec<f64> = ledger
            .entries
            .iter()
            .map(|e| e.cumulative_invested)
            .collect();

        let total_return_pct = ledger.last().map(|e| e.return_pct).unwrap_or(0.0);
        let returns = period_returns(&values, &invested);
        let annualized_return_pct = compute_annualized(&values, &returns);
        let (volatility_pct, sharpe_ratio) = compute_risk(&returns);

        PerformanceMetrics {
            total_return_pct,
            annualized_return_pct,
            volatility_pct,
            sharpe_ratio,
            max_drawdown_pct: max_drawdown_pct(&values),
        }
    }
}

/// Metrics for one ledger.
///
/// Annualized return compounds the contribution-adjusted period returns.
/// That equals `final_value / first_value` only when no capital is added
/// after the first entry (every Lump Sum ledger). For DCA it excludes the
/// monthly contributions, so a flat market annualizes to 0.
pub fn compute_metrics(ledger: &Ledger) -> PerformanceMetrics {
    PerformanceMetrics::compute(ledger)
}

/// Period returns with each period's new contribution removed from the
/// closing value. With constant invested capital this is the plain
/// period-over-period change in portfolio value.
fn period_returns(values: &[f64], invested: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .zip(invested.windows(2))
        .filter(|(v, _)| v[0] > 0.0)
        .map(|(v, c)| {
            let contribution = c[1] - c[0];
            (v[1] - contribution) / v[0] - 1.0
        })
        .collect()
}

fn compute_annualized(values: &[f64], returns: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 || values[0] == 0.0 {
        return 0.0;
    }
    let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
    if !growth.is_finite() || growth < 0.0 {
        return 0.0;
    }
    (growth.powf(TRADING_DAYS_PER_YEAR / n as f64) - 1.0) * 100.0
}

/// Returns `(volatility_pct, sharpe_ratio)`.
fn compute_risk(returns: &[f64]) -> (f64, f64) {
    let annual_std = annualized_std(returns);
    if annual_std == 0.0 {
        return (0.0, 0.0);
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    (annual_std * 100.0, mean * TRADING_DAYS_PER_YEAR / annual_std)
}

/// Sample standard deviation of period returns scaled by `sqrt(252)`, as a
/// fraction. 0 for fewer than two returns or rounding-level spread.
pub(crate) fn annualized_std(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();
    if stddev < STDDEV_EPSILON {
        return 0.0;
    }
    stddev * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Deepest decline from the running peak, in percent (`<= 0`).
///
/// The running peak includes the current point. Fewer than two values give 0.
pub fn max_drawdown_pct(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mut peak = values[0];
    let mut max_dd = 0.0_f64;
    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (value - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    (max_dd * 100.0).max(-100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelativeReturnPoint {
    pub date: NaiveDate,
    pub cumulative_return: f64,
}

/// Cumulative return of each point against the first, as a fraction.
pub fn relative_returns(series: &PriceSeries) -> Vec<RelativeReturnPoint> {
    let base = series.first().price;
    series
        .points()
        .iter()
        .map(|p| RelativeReturnPoint {
            date: p.date,
            cumulative_return: p.price / base - 1.0,
        })
        .collect()
}
