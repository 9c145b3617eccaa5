//! Side-by-side comparison of a DCA run and a Lump Sum run.

use crate::domain::ledger::{return_pct, Ledger};
use crate::domain::strategy::StrategyKind;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategySummary {
    pub kind: StrategyKind,
    pub total_invested: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub cumulative_shares: f64,
    /// Average price paid per share (the entry price for Lump Sum).
    pub average_cost: f64,
}

impl StrategySummary {
    /// Summary valued at the ledger's own last entry.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self::marked_at(ledger, ledger.last().map(|e| e.price).unwrap_or(0.0))
    }

    /// Summary with the final holding valued at `price`.
    pub fn marked_at(ledger: &Ledger, price: f64) -> Self {
        let total_invested = ledger.total_invested();
        let cumulative_shares = ledger.total_shares();
        let final_value = cumulative_shares * price;
        StrategySummary {
            kind: ledger.kind,
            total_invested,
            final_value,
            total_return_pct: return_pct(final_value, total_invested),
            cumulative_shares,
            average_cost: ledger.average_cost(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyComparison {
    pub dca: StrategySummary,
    pub lump_sum: StrategySummary,
    pub winner: StrategyKind,
    /// Absolute gap between the two total returns, in percentage points.
    pub margin_pct: f64,
    /// Date whose price values both holdings; `None` when both ledgers are empty.
    pub valued_at: Option<NaiveDate>,
}

/// Values both holdings at the latest date either ledger reaches, then
/// picks the winner. DCA wins only with a strictly higher total return.
///
/// The DCA ledger ends on its last purchase while the Lump Sum ledger runs
/// to the end of the series, so the Lump Sum's last price is normally the
/// common mark.
pub fn compare(dca: &Ledger, lump_sum: &Ledger) -> StrategyComparison {
    let mark = match (dca.last(), lump_sum.last()) {
        (Some(d), Some(l)) if d.date > l.date => Some((d.date, d.price)),
        (_, Some(l)) => Some((l.date, l.price)),
        (Some(d), None) => Some((d.date, d.price)),
        (None, None) => None,
    };

    let (dca, lump_sum) = match mark {
        Some((_, price)) => (
            StrategySummary::marked_at(dca, price),
            StrategySummary::marked_at(lump_sum, price),
        ),
        None => (
            StrategySummary::from_ledger(dca),
            StrategySummary::from_ledger(lump_sum),
        ),
    };
    let winner = if dca.total_return_pct > lump_sum.total_return_pct {
        StrategyKind::Dca
    } else {
        StrategyKind::LumpSum
    };
    let margin_pct = (dca.total_return_pct - lump_sum.total_return_pct).abs();
    StrategyComparison {
        dca,
        lump_sum,
        winner,
        margin_pct,
        valued_at: mark.map(|(date, _)| date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::{PricePoint, PriceSeries};
    use crate::domain::simulator::{simulate_dca, simulate_lump_sum};
    use crate::domain::strategy::{DcaConfig, LumpSumConfig};
    use chrono::{Months, NaiveDate};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
    }

    fn monthly(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_points(
            prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint {
                    date: start().checked_add_months(Months::new(i as u32)).unwrap(),
                    price,
                })
                .collect(),
        )
        .unwrap()
    }

    fn run(prices: &[f64]) -> StrategyComparison {
        let series = monthly(prices);
        let n = prices.len() as u32;
        let dca = simulate_dca(
            &series,
            &DcaConfig {
                monthly_amount: 1000.0,
                duration_months: n,
                start_date: start(),
            },
        )
        .unwrap();
        let lump = simulate_lump_sum(
            &series,
            &LumpSumConfig {
                amount: 1000.0 * n as f64,
                start_date: start(),
            },
        )
        .unwrap();
        compare(&dca, &lump)
    }

    #[test]
    fn rising_market_favours_lump_sum() {
        let cmp = run(&[100.0, 150.0, 200.0]);
        assert_eq!(cmp.winner, StrategyKind::LumpSum);
        assert!((cmp.lump_sum.total_return_pct - 100.0).abs() < 1e-9);
        assert!((cmp.lump_sum.average_cost - 100.0).abs() < 1e-9);
        assert!(cmp.margin_pct > 0.0);
    }

    #[test]
    fn falling_then_recovering_market_favours_dca() {
        let cmp = run(&[100.0, 50.0, 100.0]);
        assert_eq!(cmp.winner, StrategyKind::Dca);
        // 10 + 20 + 10 shares at a final price of 100.
        assert!((cmp.dca.final_value - 4000.0).abs() < 1e-9);
        assert!((cmp.dca.average_cost - 75.0).abs() < 1e-9);
        assert!((cmp.margin_pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn both_holdings_valued_on_last_series_date() {
        // Monthly purchases end on 2023-03-02; the series runs on to April.
        let series = PriceSeries::from_points(vec![
            PricePoint { date: start(), price: 100.0 },
            PricePoint { date: NaiveDate::from_ymd_opt(2023, 2, 2).unwrap(), price: 50.0 },
            PricePoint { date: NaiveDate::from_ymd_opt(2023, 3, 2).unwrap(), price: 50.0 },
            PricePoint { date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(), price: 200.0 },
        ])
        .unwrap();
        let dca = simulate_dca(
            &series,
            &DcaConfig {
                monthly_amount: 1000.0,
                duration_months: 3,
                start_date: start(),
            },
        )
        .unwrap();
        let lump = simulate_lump_sum(
            &series,
            &LumpSumConfig {
                amount: 3000.0,
                start_date: start(),
            },
        )
        .unwrap();

        let cmp = compare(&dca, &lump);

        assert_eq!(cmp.valued_at, NaiveDate::from_ymd_opt(2023, 4, 3));
        // 10 + 20 + 20 shares at 200 against 30 shares at 200.
        assert!((cmp.dca.final_value - 10_000.0).abs() < 1e-9);
        assert!((cmp.lump_sum.final_value - 6000.0).abs() < 1e-9);
        assert_eq!(cmp.winner, StrategyKind::Dca);
        assert!((cmp.margin_pct - (10_000.0 / 30.0 - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_ledgers_compare_as_tie() {
        let cmp = compare(
            &Ledger::new(StrategyKind::Dca),
            &Ledger::new(StrategyKind::LumpSum),
        );
        assert_eq!(cmp.valued_at, None);
        assert_eq!(cmp.winner, StrategyKind::LumpSum);
        assert_eq!(cmp.dca.final_value, 0.0);
    }

    #[test]
    fn tie_goes_to_lump_sum() {
        let cmp = run(&[100.0, 100.0]);
        assert_eq!(cmp.winner, StrategyKind::LumpSum);
        assert_eq!(cmp.margin_pct, 0.0);
    }
}
