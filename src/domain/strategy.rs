//! Investment strategy configuration.

use crate::domain::error::DcasimError;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Dca,
    LumpSum,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Dca => write!(f, "DCA"),
            StrategyKind::LumpSum => write!(f, "Lump Sum"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DcaConfig {
    pub monthly_amount: f64,
    pub duration_months: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LumpSumConfig {
    pub amount: f64,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrategyConfig {
    Dca(DcaConfig),
    LumpSum(LumpSumConfig),
}

fn check_amount(name: &str, amount: f64) -> Result<(), DcasimError> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(DcasimError::InvalidStrategy {
            reason: format!("{} must be positive, got {}", name, amount),
        });
    }
    Ok(())
}

impl DcaConfig {
    pub fn validate(&self) -> Result<(), DcasimError> {
        check_amount("monthly_amount", self.monthly_amount)?;
        if self.duration_months < 1 {
            return Err(DcasimError::InvalidStrategy {
                reason: "duration_months must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn planned_investment(&self) -> f64 {
        self.monthly_amount * self.duration_months as f64
    }
}

impl LumpSumConfig {
    pub fn validate(&self) -> Result<(), DcasimError> {
        check_amount("amount", self.amount)
    }
}

impl StrategyConfig {
    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyConfig::Dca(_) => StrategyKind::Dca,
            StrategyConfig::LumpSum(_) => StrategyKind::LumpSum,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        match self {
            StrategyConfig::Dca(c) => c.start_date,
            StrategyConfig::LumpSum(c) => c.start_date,
        }
    }

    pub fn validate(&self) -> Result<(), DcasimError> {
        match self {
            StrategyConfig::Dca(c) => c.validate(),
            StrategyConfig::LumpSum(c) => c.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    fn dca(monthly_amount: f64, duration_months: u32) -> DcaConfig {
        DcaConfig {
            monthly_amount,
            duration_months,
            start_date: start(),
        }
    }

    #[test]
    fn valid_dca() {
        assert!(dca(1000.0, 12).validate().is_ok());
        assert_eq!(dca(1000.0, 12).planned_investment(), 12_000.0);
    }

    #[test]
    fn dca_rejects_zero_amount() {
        assert!(matches!(
            dca(0.0, 12).validate(),
            Err(DcasimError::InvalidStrategy { .. })
        ));
    }

    #[test]
    fn dca_rejects_nan_amount() {
        assert!(dca(f64::NAN, 12).validate().is_err());
    }

    #[test]
    fn dca_rejects_zero_duration() {
        assert!(matches!(
            dca(1000.0, 0).validate(),
            Err(DcasimError::InvalidStrategy { .. })
        ));
    }

    #[test]
    fn lump_sum_rejects_negative_amount() {
        let cfg = LumpSumConfig {
            amount: -5.0,
            start_date: start(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn strategy_config_dispatch() {
        let cfg = StrategyConfig::LumpSum(LumpSumConfig {
            amount: 10.0,
            start_date: start(),
        });
        assert_eq!(cfg.kind(), StrategyKind::LumpSum);
        assert_eq!(cfg.start_date(), start());
        assert!(cfg.validate().is_ok());
        assert_eq!(StrategyKind::Dca.to_string(), "DCA");
        assert_eq!(StrategyKind::LumpSum.to_string(), "Lump Sum");
    }
}
