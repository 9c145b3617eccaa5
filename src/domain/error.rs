//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for dcasim.
#[derive(Debug, thiserror::Error)]
pub enum DcasimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("malformed price history: {reason}")]
    MalformedHistory { reason: String },

    #[error("no price data available: {reason}")]
    DataUnavailable { reason: String },

    #[error("no trading date on or after {start_date} (series ends {last_date})")]
    NoEntryPoint {
        start_date: NaiveDate,
        last_date: NaiveDate,
    },

    #[error("invalid strategy: {reason}")]
    InvalidStrategy { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DcasimError> for std::process::ExitCode {
    fn from(err: &DcasimError) -> Self {
        let code: u8 = match err {
            DcasimError::Io(_) => 1,
            DcasimError::ConfigParse { .. }
            | DcasimError::ConfigMissing { .. }
            | DcasimError::ConfigInvalid { .. } => 2,
            DcasimError::DataSource { .. } | DcasimError::MalformedHistory { .. } => 3,
            DcasimError::InvalidStrategy { .. } => 4,
            DcasimError::DataUnavailable { .. } | DcasimError::NoEntryPoint { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_entry_point_message_names_both_dates() {
        let err = DcasimError::NoEntryPoint {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            last_date: NaiveDate::from_ymd_opt(2024, 12, 30).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2025-01-01"));
        assert!(msg.contains("2024-12-30"));
    }
}
