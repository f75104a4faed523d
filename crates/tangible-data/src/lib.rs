#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tangible/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod provider;
pub mod types;
pub mod yahoo;

pub use error::{DataError, Result};
pub use provider::MarketDataProvider;
pub use types::{
    BalanceSheet, BalanceSheetPeriod, CompanyProfile, PricePoint, PriceSeries, RawPeriodRecord,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
