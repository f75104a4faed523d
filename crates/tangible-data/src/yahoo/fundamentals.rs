//! Company profiles and annual balance sheets from Yahoo Finance.
//!
//! Profiles come from the quoteSummary modules exposed by
//! `yahoo_finance_api`. Balance sheets come from the fundamentals-timeseries
//! endpoint, which reports one series per line item (`annualGoodwill`,
//! `annualStockholdersEquity`, ...). The series are pivoted into one
//! [`RawPeriodRecord`] per as-of date, keyed by the line-item name without
//! the `annual` prefix.

use crate::error::{DataError, Result};
use crate::types::{BalanceSheet, BalanceSheetPeriod, CompanyProfile, RawPeriodRecord};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;
use yahoo_finance_api as yahoo;

const TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Earliest timestamp requested from the timeseries endpoint (2015-08-24).
const TIMESERIES_START: i64 = 1_440_374_400;

const ANNUAL_PREFIX: &str = "annual";

/// Balance-sheet line items requested from the timeseries endpoint.
///
/// Every Yahoo-spelled field the normalization engine probes, and nothing else.
pub const BALANCE_SHEET_FIELDS: &[&str] = &[
    "Goodwill",
    "GoodwillAndOtherIntangibleAssets",
    "IntangibleAssets",
    "IntangibleAssetsNetExcludingGoodwill",
    "OtherIntangibleAssets",
    "OtherNonCurrentAssets",
    "TotalEquityGrossMinorityInterest",
    "StockholdersEquity",
    "TotalStockholdersEquity",
];

/// Yahoo Finance fundamentals provider.
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    connector: Mutex<yahoo::YahooConnector>,
}

impl std::fmt::Debug for YahooFundamentalsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooFundamentalsProvider")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl YahooFundamentalsProvider {
    /// Create a new Yahoo Finance fundamentals provider.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
            .build()?;

        Ok(Self {
            client,
            connector: Mutex::new(yahoo::YahooConnector::new()?),
        })
    }

    /// Fetch the company profile for a symbol.
    pub async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let summary = {
            let mut connector = self.connector.lock().await;
            connector.get_ticker_info(symbol).await?
        };

        let data = summary
            .quote_summary
            .and_then(|qs| qs.result)
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No quoteSummary result".to_string(),
            })?;

        let mut profile = CompanyProfile {
            symbol: symbol.to_string(),
            ..Default::default()
        };

        if let Some(ref qt) = data.quote_type {
            profile.long_name = qt
                .long_name
                .clone()
                .or_else(|| qt.short_name.clone())
                .unwrap_or_default();
        }

        if let Some(ref ap) = data.asset_profile {
            profile.industry = ap.industry.clone();
            profile.sector = ap.sector.clone();
        }

        if let Some(ref ks) = data.default_key_statistics {
            profile.shares_outstanding = ks.shares_outstanding.map(|v| v as f64);
        }

        debug!(
            symbol,
            industry = ?profile.industry,
            shares = ?profile.shares_outstanding,
            "fetched profile"
        );

        Ok(profile)
    }

    /// Fetch the annual balance sheet for a symbol, most recent period first.
    pub async fn fetch_balance_sheet(&self, symbol: &str) -> Result<BalanceSheet> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let types = BALANCE_SHEET_FIELDS
            .iter()
            .map(|f| format!("{ANNUAL_PREFIX}{f}"))
            .collect::<Vec<_>>()
            .join(",");
        let period2 = Utc::now().timestamp().to_string();
        let period1 = TIMESERIES_START.to_string();
        let url = format!("{TIMESERIES_URL}/{symbol}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("type", types.as_str()),
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch balance sheet for {}: {}",
                symbol,
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let sheet = parse_timeseries(&body)?;

        debug!(symbol, periods = sheet.len(), "fetched balance sheet");

        Ok(sheet)
    }
}

/// Pivot a fundamentals-timeseries response into a balance sheet.
///
/// Periods are ordered most recent first. A series with no observations
/// contributes nothing; a null observation records the field as empty.
pub fn parse_timeseries(body: &Value) -> Result<BalanceSheet> {
    let results = body
        .pointer("/timeseries/result")
        .and_then(Value::as_array)
        .ok_or_else(|| DataError::Parse("missing timeseries.result array".to_string()))?;

    let mut by_date: BTreeMap<NaiveDate, RawPeriodRecord> = BTreeMap::new();

    for series in results {
        let Some(series_type) = series
            .pointer("/meta/type/0")
            .and_then(Value::as_str)
        else {
            continue;
        };
        let field = series_type
            .strip_prefix(ANNUAL_PREFIX)
            .unwrap_or(series_type);

        let Some(observations) = series.get(series_type).and_then(Value::as_array) else {
            continue;
        };

        for observation in observations {
            let Some(as_of) = observation.get("asOfDate").and_then(Value::as_str) else {
                continue;
            };
            let date = NaiveDate::parse_from_str(as_of, "%Y-%m-%d")
                .map_err(|e| DataError::Parse(format!("bad asOfDate {as_of}: {e}")))?;
            let value = observation
                .pointer("/reportedValue/raw")
                .and_then(Value::as_f64);

            by_date.entry(date).or_default().insert(field, value);
        }
    }

    let periods = by_date
        .into_iter()
        .rev()
        .map(|(date, record)| BalanceSheetPeriod::on(date, record))
        .collect();

    Ok(BalanceSheet::new(periods))
}
