//! The market-data collaborator consumed by the engine.

use crate::error::Result;
use crate::types::{BalanceSheet, CompanyProfile, PriceSeries};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of per-company raw data.
///
/// Implementations perform I/O only; they never normalize field names or
/// fill gaps. Each call may fail independently, and callers decide at which
/// scope (company or period) a failure is absorbed.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Company profile lookup: name, industry, sector and current share count.
    async fn profile(&self, symbol: &str) -> Result<CompanyProfile>;

    /// Annual balance sheet, one period per reported as-of date.
    async fn balance_sheet(&self, symbol: &str) -> Result<BalanceSheet>;

    /// Daily closes dated in `[start, end)`.
    async fn price_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;
}
