//! Yahoo Finance data providers.

pub mod fundamentals;
pub mod quotes;

pub use fundamentals::{BALANCE_SHEET_FIELDS, YahooFundamentalsProvider, parse_timeseries};
pub use quotes::YahooQuoteProvider;

use crate::error::Result;
use crate::provider::MarketDataProvider;
use crate::types::{BalanceSheet, CompanyProfile, PriceSeries};
use async_trait::async_trait;
use chrono::NaiveDate;

/// [`MarketDataProvider`] backed by Yahoo Finance.
#[derive(Debug)]
pub struct YahooProvider {
    quotes: YahooQuoteProvider,
    fundamentals: YahooFundamentalsProvider,
}

impl YahooProvider {
    /// Create a provider with fresh Yahoo connectors.
    pub fn new() -> Result<Self> {
        Ok(Self {
            quotes: YahooQuoteProvider::new()?,
            fundamentals: YahooFundamentalsProvider::new()?,
        })
    }
}

/// Map an exchange ticker to Yahoo's spelling (`BRK.B` becomes `BRK-B`).
pub fn yahoo_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace('.', "-")
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let mut profile = self.fundamentals.fetch_profile(&yahoo_symbol(symbol)).await?;
        profile.symbol = symbol.to_string();
        Ok(profile)
    }

    async fn balance_sheet(&self, symbol: &str) -> Result<BalanceSheet> {
        self.fundamentals
            .fetch_balance_sheet(&yahoo_symbol(symbol))
            .await
    }

    async fn price_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        self.quotes
            .fetch_closes(&yahoo_symbol(symbol), start, end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("BRK.B", "BRK-B")]
    #[case(" aapl ", "AAPL")]
    #[case("BF-B", "BF-B")]
    #[case("MSFT", "MSFT")]
    fn test_yahoo_symbol(#[case] symbol: &str, #[case] expected: &str) {
        assert_eq!(yahoo_symbol(symbol), expected);
    }
}
