//! Simulation ledger: per-period portfolio snapshots.

use crate::domain::strategy::StrategyKind;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub price: f64,
    pub shares_acquired: f64,
    pub cumulative_shares: f64,
    pub cumulative_invested: f64,
    pub portfolio_value: f64,
    pub return_pct: f64,
}

/// A DCA month whose purchase did not execute.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPurchase {
    pub month_index: u32,
    pub target_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub kind: StrategyKind,
    pub entries: Vec<LedgerEntry>,
    pub skipped: Vec<SkippedPurchase>,
}

impl Ledger {
    pub fn new(kind: StrategyKind) -> Self {
        Ledger {
            kind,
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    pub fn record_skip(&mut self, skip: SkippedPurchase) {
        self.skipped.push(skip);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&LedgerEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }

    pub fn portfolio_values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.portfolio_value).collect()
    }

    pub fn total_invested(&self) -> f64 {
        self.last().map(|e| e.cumulative_invested).unwrap_or(0.0)
    }

    pub fn final_value(&self) -> f64 {
        self.last().map(|e| e.portfolio_value).unwrap_or(0.0)
    }

    pub fn total_shares(&self) -> f64 {
        self.last().map(|e| e.cumulative_shares).unwrap_or(0.0)
    }

    /// Invested capital per share held; 0 before any purchase.
    pub fn average_cost(&self) -> f64 {
        let shares = self.total_shares();
        if shares > 0.0 {
            self.total_invested() / shares
        } else {
            0.0
        }
    }
}

/// `(value - invested) / invested * 100`, or 0 with nothing invested.
pub fn return_pct(portfolio_value: f64, invested: f64) -> f64 {
    if invested > 0.0 {
        (portfolio_value - invested) / invested * 100.0
    } else {
        0.0
    }
}
