//! Configuration validation.
//!
//! Checks every field a command reads before any data is fetched, so a bad
//! config fails fast with the offending `[section] key`.

use crate::domain::error::DcasimError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATA: &str = "data";
pub const SIMULATION: &str = "simulation";

/// Validates everything `simulate` needs for the configured strategy.
pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    validate_data_config(config)?;
    validate_window(config)?;
    validate_strategy_amounts(config, parse_strategy_kind(config)?)
}

/// Amount keys required to run `kind`, which may differ from the configured
/// strategy when overridden on the command line.
pub fn validate_strategy_amounts(
    config: &dyn ConfigPort,
    kind: StrategyKind,
) -> Result<(), DcasimError> {
    match kind {
        StrategyKind::Dca => validate_monthly_amount(config),
        StrategyKind::LumpSum => validate_lump_sum_amount(config),
    }
}

/// Validates everything `compare` needs: both strategies share one window.
pub fn validate_comparison_config(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    validate_data_config(config)?;
    validate_window(config)?;
    validate_monthly_amount(config)?;
    validate_lump_sum_amount(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    if config.get_string(DATA, "path").is_none() {
        return Err(DcasimError::ConfigMissing {
            section: DATA.to_string(),
            key: "path".to_string(),
        });
    }
    if let Some(fields) = config.get_string(DATA, "price_fields") {
        if fields.split(',').all(|f| f.trim().is_empty()) {
            return Err(DcasimError::ConfigInvalid {
                section: DATA.to_string(),
                key: "price_fields".to_string(),
                reason: "price_fields must name at least one column".to_string(),
            });
        }
    }
    if config.get_int(DATA, "cache_ttl_seconds", 0) < 0 {
        return Err(DcasimError::ConfigInvalid {
            section: DATA.to_string(),
            key: "cache_ttl_seconds".to_string(),
            reason: "cache_ttl_seconds must be non-negative".to_string(),
        });
    }
    Ok(())
}

/// Start date, duration and the optional explicit end date.
pub fn validate_window(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    let start_date = parse_date(config, SIMULATION, "start_date")?;

    let duration = config.get_int(SIMULATION, "duration_months", 0);
    if duration < 1 {
        return Err(DcasimError::ConfigInvalid {
            section: SIMULATION.to_string(),
            key: "duration_months".to_string(),
            reason: "duration_months must be at least 1".to_string(),
        });
    }

    if config.get_string(SIMULATION, "end_date").is_some() {
        let end_date = parse_date(config, SIMULATION, "end_date")?;
        if start_date >= end_date {
            return Err(DcasimError::ConfigInvalid {
                section: SIMULATION.to_string(),
                key: "start_date".to_string(),
                reason: "start_date must be before end_date".to_string(),
            });
        }
    }
    Ok(())
}

pub fn parse_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<NaiveDate, DcasimError> {
    match config.get_string(section, key) {
        None => Err(DcasimError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| DcasimError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", key),
            })
        }
    }
}

/// `strategy` key; defaults to DCA when absent.
pub fn parse_strategy_kind(config: &dyn ConfigPort) -> Result<StrategyKind, DcasimError> {
    match config.get_string(SIMULATION, "strategy") {
        None => Ok(StrategyKind::Dca),
        Some(s) => strategy_kind_from_str(&s).ok_or_else(|| DcasimError::ConfigInvalid {
            section: SIMULATION.to_string(),
            key: "strategy".to_string(),
            reason: format!("unknown strategy '{}', expected dca or lump_sum", s),
        }),
    }
}

pub fn strategy_kind_from_str(value: &str) -> Option<StrategyKind> {
    match value.trim().to_lowercase().replace('-', "_").as_str() {
        "dca" => Some(StrategyKind::Dca),
        "lump_sum" | "lumpsum" => Some(StrategyKind::LumpSum),
        _ => None,
    }
}

fn validate_monthly_amount(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    let value = config.get_double(SIMULATION, "monthly_amount", 0.0);
    if !(value > 0.0 && value.is_finite()) {
        return Err(DcasimError::ConfigInvalid {
            section: SIMULATION.to_string(),
            key: "monthly_amount".to_string(),
            reason: "monthly_amount must be positive".to_string(),
        });
    }
    Ok(())
}

/// `lump_sum_amount` may be omitted when `monthly_amount` is set; the lump
/// sum then matches the DCA plan's total.
fn validate_lump_sum_amount(config: &dyn ConfigPort) -> Result<(), DcasimError> {
    if config.get_string(SIMULATION, "lump_sum_amount").is_none() {
        return validate_monthly_amount(config).map_err(|_| DcasimError::ConfigMissing {
            section: SIMULATION.to_string(),
            key: "lump_sum_amount".to_string(),
        });
    }
    let value = config.get_double(SIMULATION, "lump_sum_amount", 0.0);
    if !(value > 0.0 && value.is_finite()) {
        return Err(DcasimError::ConfigInvalid {
            section: SIMULATION.to_string(),
            key: "lump_sum_amount".to_string(),
            reason: "lump_sum_amount must be positive".to_string(),
        });
    }
    Ok(())
}
