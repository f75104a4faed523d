//! Engine errors.
//!
//! Fetch failures are classified by the scope at which they are absorbed and
//! never abort a run. An unresolvable canonical field is not an error at all;
//! it is `None`.

use chrono::NaiveDate;
use tangible_data::DataError;
use thiserror::Error;

/// A provider failure tagged with the unit of work it invalidates.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The ticker universe could not be loaded; the run continues empty.
    #[error("Universe fetch failed: {0}")]
    Universe(#[source] DataError),

    /// Profile or balance-sheet fetch failed; the company is skipped.
    #[error("Fetch failed for {symbol}: {source}")]
    Company {
        /// Ticker symbol
        symbol: String,
        /// Underlying provider error
        #[source]
        source: DataError,
    },

    /// Price-history fetch failed; only this period's market value is lost.
    #[error("Price history fetch failed for {symbol} at {report_date}: {source}")]
    PeriodPrice {
        /// Ticker symbol
        symbol: String,
        /// Normalized report date of the affected period
        report_date: NaiveDate,
        /// Underlying provider error
        #[source]
        source: DataError,
    },
}

/// Errors raised while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a run configuration
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl FetchError {
    /// Ticker the failure belongs to, if any.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Universe(_) => None,
            Self::Company { symbol, .. } | Self::PeriodPrice { symbol, .. } => Some(symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_symbol() {
        let err = FetchError::PeriodPrice {
            symbol: "AAPL".to_string(),
            report_date: NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
            source: DataError::Http("503".to_string()),
        };
        assert_eq!(err.symbol(), Some("AAPL"));
        assert!(err.to_string().contains("2023-09-30"));

        let err = FetchError::Universe(DataError::Parse("no table".to_string()));
        assert_eq!(err.symbol(), None);
    }
}
