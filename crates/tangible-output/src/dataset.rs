//! Canonical output rows and the run-wide dataset.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column names of the output table, in order.
pub const COLUMNS: [&str; 10] = [
    "Ticker",
    "Company Name",
    "Industry",
    "Sector",
    "Year",
    "Market Cap",
    "Tangible Book Value",
    "Goodwill",
    "Other Intangible Assets",
    "Multiplier",
];

/// One row per (company, fiscal period) with a balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputRow {
    /// Ticker symbol as it appears in the universe.
    #[serde(rename = "Ticker")]
    pub ticker: String,

    /// Long company name.
    #[serde(rename = "Company Name")]
    pub company_name: String,

    /// Industry label, empty when unknown.
    #[serde(rename = "Industry")]
    pub industry: String,

    /// Sector label, empty when unknown.
    #[serde(rename = "Sector")]
    pub sector: String,

    /// Fiscal year of the report date.
    #[serde(rename = "Year")]
    pub year: i32,

    /// Estimated historical market capitalization.
    #[serde(rename = "Market Cap")]
    pub market_cap: Option<f64>,

    /// Total equity less goodwill and other intangibles.
    #[serde(rename = "Tangible Book Value")]
    pub tangible_book_value: Option<f64>,

    /// Goodwill.
    #[serde(rename = "Goodwill")]
    pub goodwill: Option<f64>,

    /// Intangible assets other than goodwill.
    #[serde(rename = "Other Intangible Assets")]
    pub other_intangible_assets: Option<f64>,

    /// Valuation multiplier for the company's industry class.
    #[serde(rename = "Multiplier")]
    pub multiplier: f64,
}

/// Append-only collection of output rows for a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<OutputRow>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row.
    pub fn push(&mut self, row: OutputRow) {
        self.rows.push(row);
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were produced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct tickers with at least one row.
    pub fn company_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.ticker.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Rows whose market value could not be estimated.
    pub fn unresolved_market_caps(&self) -> usize {
        self.rows.iter().filter(|r| r.market_cap.is_none()).count()
    }

    /// Rows whose tangible book value could not be computed.
    pub fn unresolved_tangible_book_values(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.tangible_book_value.is_none())
            .count()
    }

    /// Convert the dataset to a Polars DataFrame with the output column names.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let tickers: Vec<&str> = self.rows.iter().map(|r| r.ticker.as_str()).collect();
        let names: Vec<&str> = self.rows.iter().map(|r| r.company_name.as_str()).collect();
        let industries: Vec<&str> = self.rows.iter().map(|r| r.industry.as_str()).collect();
        let sectors: Vec<&str> = self.rows.iter().map(|r| r.sector.as_str()).collect();
        let years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        let market_caps: Vec<Option<f64>> = self.rows.iter().map(|r| r.market_cap).collect();
        let tbvs: Vec<Option<f64>> = self.rows.iter().map(|r| r.tangible_book_value).collect();
        let goodwill: Vec<Option<f64>> = self.rows.iter().map(|r| r.goodwill).collect();
        let other: Vec<Option<f64>> = self
            .rows
            .iter()
            .map(|r| r.other_intangible_assets)
            .collect();
        let multipliers: Vec<f64> = self.rows.iter().map(|r| r.multiplier).collect();

        DataFrame::new(vec![
            Series::new(COLUMNS[0].into(), tickers).into(),
            Series::new(COLUMNS[1].into(), names).into(),
            Series::new(COLUMNS[2].into(), industries).into(),
            Series::new(COLUMNS[3].into(), sectors).into(),
            Series::new(COLUMNS[4].into(), years).into(),
            Series::new(COLUMNS[5].into(), market_caps).into(),
            Series::new(COLUMNS[6].into(), tbvs).into(),
            Series::new(COLUMNS[7].into(), goodwill).into(),
            Series::new(COLUMNS[8].into(), other).into(),
            Series::new(COLUMNS[9].into(), multipliers).into(),
        ])
    }

    /// Format as an ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<8} {:>6} {:>18} {:>18} {:>16} {:>16} {:>8}\n",
            "Ticker", "Year", "Market Cap", "Tangible BV", "Goodwill", "Other Intang.", "Mult."
        ));
        output.push_str(&"-".repeat(96));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<8} {:>6} {:>18} {:>18} {:>16} {:>16} {:>8.4}\n",
                row.ticker,
                row.year,
                format_amount(row.market_cap),
                format_amount(row.tangible_book_value),
                format_amount(row.goodwill),
                format_amount(row.other_intangible_assets),
                row.multiplier
            ));
        }

        output
    }
}

impl Extend<OutputRow> for Dataset {
    fn extend<T: IntoIterator<Item = OutputRow>>(&mut self, iter: T) {
        self.rows.extend(iter);
    }
}

impl FromIterator<OutputRow> for Dataset {
    fn from_iter<T: IntoIterator<Item = OutputRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

fn format_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_row(ticker: &str, year: i32, market_cap: Option<f64>) -> OutputRow {
        OutputRow {
            ticker: ticker.to_string(),
            company_name: format!("{ticker} Inc."),
            industry: "Software - Application".to_string(),
            sector: "Technology".to_string(),
            year,
            market_cap,
            tangible_book_value: Some(360.0),
            goodwill: Some(100.0),
            other_intangible_assets: Some(40.0),
            multiplier: 0.1625,
        }
    }

    #[test]
    fn test_dataset_counts() {
        let mut dataset = Dataset::new();
        assert!(dataset.is_empty());

        dataset.push(sample_row("AAPL", 2024, Some(1.0e12)));
        dataset.push(sample_row("AAPL", 2023, None));
        dataset.extend([sample_row("MSFT", 2024, Some(2.0e12))]);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.company_count(), 2);
        assert_eq!(dataset.unresolved_market_caps(), 1);
        assert_eq!(dataset.unresolved_tangible_book_values(), 0);
    }

    #[test]
    fn test_to_dataframe_columns() {
        let dataset: Dataset = vec![sample_row("AAPL", 2024, None), sample_row("MSFT", 2023, Some(5.0))]
            .into_iter()
            .collect();

        let df = dataset.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names(), COLUMNS.to_vec());
        assert_eq!(df.column("Market Cap").unwrap().null_count(), 1);
    }

    #[test]
    fn test_dataframe_renders_for_terminal() {
        let dataset: Dataset = vec![sample_row("AAPL", 2024, None)].into_iter().collect();
        let rendered = dataset.to_dataframe().unwrap().to_string();

        assert!(rendered.contains("shape: (1, 10)"));
        assert!(rendered.contains("Ticker"));
        assert!(rendered.contains("AAPL"));
    }

    #[test]
    fn test_ascii_table_marks_unresolved() {
        let dataset: Dataset = vec![sample_row("AAPL", 2024, None)].into_iter().collect();
        let table = dataset.to_ascii_table();
        assert!(table.contains("AAPL"));
        assert!(table.contains("2024"));
        assert!(table.contains(" -"));
        assert!(table.contains("360"));
    }
}
