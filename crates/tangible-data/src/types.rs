//! Raw provider inputs consumed by the engine.
//!
//! Everything here is read-only from the engine's point of view: field names
//! are kept exactly as the provider reported them, and a missing or
//! non-numeric cell is simply absent.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Company profile snapshot returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Stock symbol
    pub symbol: String,
    /// Long company name (empty when the provider has none)
    pub long_name: String,
    /// Free-text industry label
    pub industry: Option<String>,
    /// Free-text sector label
    pub sector: Option<String>,
    /// Current shares outstanding, not a historical series
    pub shares_outstanding: Option<f64>,
}

/// One fiscal period of balance-sheet line items, keyed by provider field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPeriodRecord {
    fields: BTreeMap<String, Option<f64>>,
}

impl RawPeriodRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present value.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.insert(field, Some(value));
        self
    }

    /// Insert a cell. `None` records that the field label exists without a value.
    pub fn insert(&mut self, field: impl Into<String>, value: Option<f64>) {
        self.fields.insert(field.into(), value);
    }

    /// Value of a field, or `None` when the field is missing, null or NaN.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields
            .get(field)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    /// Whether the field carries a usable value.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field names in lexical order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of cells, including empty ones.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no cell is recorded at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RawPeriodRecord {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.insert(field, Some(value));
        }
        record
    }
}

/// A balance-sheet column: the as-of date and its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetPeriod {
    /// Report date as delivered by the provider, possibly timezone-aware
    pub report_date: DateTime<FixedOffset>,
    /// Line items for this period
    pub record: RawPeriodRecord,
}

impl BalanceSheetPeriod {
    /// Create a period from a timestamp.
    pub const fn new(report_date: DateTime<FixedOffset>, record: RawPeriodRecord) -> Self {
        Self {
            report_date,
            record,
        }
    }

    /// Create a period dated at midnight UTC of `date`.
    pub fn on(date: NaiveDate, record: RawPeriodRecord) -> Self {
        let report_date = date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .fixed_offset();
        Self::new(report_date, record)
    }
}

/// All balance-sheet periods for one company, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Periods in the order the provider returned them
    pub periods: Vec<BalanceSheetPeriod>,
}

impl BalanceSheet {
    /// Create a balance sheet from periods.
    pub const fn new(periods: Vec<BalanceSheetPeriod>) -> Self {
        Self { periods }
    }

    /// Whether there are no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }
}

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

/// Ordered daily closing prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series, sorting the points by date.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// All points in date order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closes dated in `[start, end)`.
    pub fn closes_between(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = f64> {
        self.points
            .iter()
            .filter(move |p| p.date >= start && p.date < end)
            .map(|p| p.close)
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

impl FromIterator<(NaiveDate, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(date, close)| PricePoint { date, close })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_treats_null_and_nan_as_absent() {
        let mut record = RawPeriodRecord::new().with("Goodwill", 100.0);
        record.insert("OtherIntangibleAssets", None);
        record.insert("StockholdersEquity", Some(f64::NAN));

        assert_eq!(record.get("Goodwill"), Some(100.0));
        assert_eq!(record.get("OtherIntangibleAssets"), None);
        assert_eq!(record.get("StockholdersEquity"), None);
        assert_eq!(record.get("Missing"), None);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_record_keeps_zero() {
        let record = RawPeriodRecord::new().with("Goodwill", 0.0);
        assert!(record.has("Goodwill"));
        assert_eq!(record.get("Goodwill"), Some(0.0));
    }

    #[test]
    fn test_record_from_iter() {
        let record: RawPeriodRecord = [("Goodwill", 1.0), ("StockholdersEquity", 2.0)]
            .into_iter()
            .collect();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["Goodwill", "StockholdersEquity"]);
    }

    #[test]
    fn test_period_on_date_is_utc_midnight() {
        let period = BalanceSheetPeriod::on(date(2024, 9, 28), RawPeriodRecord::new());
        assert_eq!(period.report_date.offset().local_minus_utc(), 0);
        assert_eq!(period.report_date.date_naive(), date(2024, 9, 28));
    }

    #[test]
    fn test_price_series_sorted_and_windowed() {
        let series: PriceSeries = [
            (date(2024, 1, 5), 12.0),
            (date(2024, 1, 2), 10.0),
            (date(2024, 1, 3), 11.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(series.points()[0].date, date(2024, 1, 2));
        let closes: Vec<f64> = series
            .closes_between(date(2024, 1, 3), date(2024, 1, 5))
            .collect();
        assert_eq!(closes, vec![11.0]);

        let all: f64 = series
            .closes_between(date(2024, 1, 1), date(2024, 1, 6))
            .sum();
        assert_relative_eq!(all / series.len() as f64, 11.0);
    }
}
