//! DCA and Lump Sum simulation over a [`PriceSeries`].

use crate::domain::error::DcasimError;
use crate::domain::ledger::{return_pct, Ledger, LedgerEntry, SkippedPurchase};
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::{DcaConfig, LumpSumConfig, StrategyConfig, StrategyKind};
use chrono::Months;

/// Buys `monthly_amount` worth of shares once a month.
///
/// Each month's purchase executes on the first trading date on or after
/// `start_date + i months`. The run stops early, without error, once the
/// series has no date left for a month.
pub fn simulate_dca(series: &PriceSeries, cfg: &DcaConfig) -> Result<Ledger, DcasimError> {
    cfg.validate()?;

    let mut ledger = Ledger::new(StrategyKind::Dca);
    let mut cumulative_shares = 0.0_f64;
    let mut cumulative_invested = 0.0_f64;

    for month in 0..cfg.duration_months {
        let Some(target_date) = cfg.start_date.checked_add_months(Months::new(month)) else {
            break;
        };
        let Some(point) = series.on_or_after(target_date) else {
            tracing::debug!(
                month,
                %target_date,
                "series ends before target month, stopping"
            );
            break;
        };

        if !(point.price.is_finite() && point.price > 0.0) {
            tracing::warn!(
                month,
                %target_date,
                price = point.price,
                "skipping purchase at unusable price"
            );
            ledger.record_skip(SkippedPurchase {
                month_index: month,
                target_date,
                reason: format!("unusable price {} on {}", point.price, point.date),
            });
            continue;
        }

        let shares_acquired = cfg.monthly_amount / point.price;
        cumulative_shares += shares_acquired;
        cumulative_invested += cfg.monthly_amount;
        let portfolio_value = cumulative_shares * point.price;

        ledger.record(LedgerEntry {
            date: point.date,
            price: point.price,
            shares_acquired,
            cumulative_shares,
            cumulative_invested,
            portfolio_value,
            return_pct: return_pct(portfolio_value, cumulative_invested),
        });
    }

    Ok(ledger)
}

/// Invests `amount` on the first trading date on or after `start_date` and
/// tracks the holding on every later date of the series.
pub fn simulate_lump_sum(
    series: &PriceSeries,
    cfg: &LumpSumConfig,
) -> Result<Ledger, DcasimError> {
    cfg.validate()?;

    let entry_index = series
        .index_on_or_after(cfg.start_date)
        .ok_or_else(|| DcasimError::NoEntryPoint {
            start_date: cfg.start_date,
            last_date: series.last().date,
        })?;

    let points = &series.points()[entry_index..];
    let shares = cfg.amount / points[0].price;

    let mut ledger = Ledger::new(StrategyKind::LumpSum);
    for (i, point) in points.iter().enumerate() {
        let portfolio_value = shares * point.price;
        ledger.record(LedgerEntry {
            date: point.date,
            price: point.price,
            shares_acquired: if i == 0 { shares } else { 0.0 },
            cumulative_shares: shares,
            cumulative_invested: cfg.amount,
            portfolio_value,
            return_pct: return_pct(portfolio_value, cfg.amount),
        });
    }

    Ok(ledger)
}

pub fn simulate(series: &PriceSeries, cfg: &StrategyConfig) -> Result<Ledger, DcasimError> {
    match cfg {
        StrategyConfig::Dca(c) => simulate_dca(series, c),
        StrategyConfig::LumpSum(c) => simulate_lump_sum(series, c),
    }
}
