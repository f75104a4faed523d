//! Daily closing prices from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::types::{PricePoint, PriceSeries};
use chrono::{DateTime, NaiveDate, NaiveTime};
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance chart-endpoint client.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider").finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new quote provider.
    pub fn new() -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
        })
    }

    /// Fetch daily closes for `symbol` dated in `[start, end)`.
    ///
    /// An empty window is returned as an empty series, not an error.
    pub async fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = to_offset_date_time(start)?;
        let end_time = to_offset_date_time(end)?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        let mut points = Vec::with_capacity(quotes.len());
        for quote in &quotes {
            let timestamp = i64::try_from(quote.timestamp)
                .map_err(|e| DataError::TimeConversion(e.to_string()))?;
            let date = DateTime::from_timestamp(timestamp, 0)
                .ok_or_else(|| {
                    DataError::TimeConversion(format!("timestamp out of range: {timestamp}"))
                })?
                .date_naive();
            if date >= start && date < end && quote.close.is_finite() {
                points.push(PricePoint {
                    date,
                    close: quote.close,
                });
            }
        }

        debug!(symbol, %start, %end, closes = points.len(), "fetched price window");

        Ok(PriceSeries::new(points))
    }
}

/// Midnight UTC of `date` as a `time::OffsetDateTime`.
fn to_offset_date_time(date: NaiveDate) -> Result<time::OffsetDateTime> {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    time::OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| DataError::TimeConversion(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_date_time_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let odt = to_offset_date_time(date).unwrap();
        assert_eq!(odt.unix_timestamp(), 1_709_251_200);
    }

    #[tokio::test]
    async fn test_invalid_date_range() {
        let provider = YahooQuoteProvider::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let result = provider.fetch_closes("AAPL", start, end).await;
        assert!(matches!(result, Err(DataError::InvalidDateRange { .. })));
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let provider = YahooQuoteProvider::new().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let result = provider.fetch_closes("", start, end).await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }
}
