//! Export functionality for the tangible dataset.
//!
//! CSV rows carry the output column names as a header; unresolved values are
//! written as empty fields. JSON export writes an array of row objects with
//! unresolved values as `null`.

use crate::dataset::{Dataset, OutputRow};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default file prefix for persisted datasets.
pub const DEFAULT_PREFIX: &str = "sp500_financial_dataset";

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn rows_to_csv<'a>(rows: impl IntoIterator<Item = &'a OutputRow>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut wrote_any = false;
    for row in rows {
        wtr.serialize(row)?;
        wrote_any = true;
    }
    if !wrote_any {
        wtr.write_record(crate::dataset::COLUMNS)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Exporter for OutputRow {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv([self]),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Dataset {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(self.rows()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// File name `<prefix>_<YYYYMMDD_HHMMSS>.<ext>` for a run started at `at`.
pub fn timestamped_filename(prefix: &str, at: NaiveDateTime, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Persist a dataset under `dir` with a timestamped name.
///
/// Returns `Ok(None)` without touching the filesystem when the dataset is
/// empty.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn persist(
    dataset: &Dataset,
    dir: &Path,
    prefix: &str,
    at: NaiveDateTime,
    format: ExportFormat,
) -> Result<Option<PathBuf>, ExportError> {
    if dataset.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(timestamped_filename(prefix, at, format));
    dataset.export_to_file(&path, format)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample_row;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn run_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_dataset_csv_header_and_nulls() {
        let dataset: Dataset = vec![sample_row("AAPL", 2024, None)].into_iter().collect();

        let csv = dataset.export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Ticker,Company Name,Industry,Sector,Year,Market Cap,Tangible Book Value,Goodwill,Other Intangible Assets,Multiplier"
        );
        assert_eq!(
            lines.next().unwrap(),
            "AAPL,AAPL Inc.,Software - Application,Technology,2024,,360.0,100.0,40.0,0.1625"
        );
    }

    #[test]
    fn test_empty_dataset_csv_has_header_only() {
        let csv = Dataset::new().export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Ticker,"));
    }

    #[test]
    fn test_dataset_json_uses_column_names() {
        let dataset: Dataset = vec![sample_row("MSFT", 2023, Some(2.5e12))]
            .into_iter()
            .collect();

        let json = dataset.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"Company Name\":\"MSFT Inc.\""));
        assert!(json.contains("\"Tangible Book Value\":360.0"));

        let pretty = dataset.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(pretty.contains("  ")); // Indentation indicates pretty format
    }

    #[test]
    fn test_row_json_null_for_unresolved() {
        let row = sample_row("AAPL", 2022, None);
        let json = row.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"Market Cap\":null"));
    }

    #[rstest]
    #[case("CSV", ExportFormat::Csv)]
    #[case("json", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    #[case("pretty_json", ExportFormat::PrettyJson)]
    fn test_export_format_parse(#[case] input: &str, #[case] expected: ExportFormat) {
        assert_eq!(input.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_export_format_rejects_unknown() {
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }

    #[test]
    fn test_timestamped_filename() {
        assert_eq!(
            timestamped_filename(DEFAULT_PREFIX, run_time(), ExportFormat::Csv),
            "sp500_financial_dataset_20240517_093005.csv"
        );
    }

    #[test]
    fn test_persist_skips_empty_dataset() {
        let dir = std::env::temp_dir().join("tangible_output_empty_test");
        let result = persist(&Dataset::new(), &dir, "empty", run_time(), ExportFormat::Csv).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_persist_writes_file() {
        let dir = std::env::temp_dir().join("tangible_output_persist_test");
        let dataset: Dataset = vec![sample_row("AAPL", 2024, Some(1.0))].into_iter().collect();

        let path = persist(&dataset, &dir, "persist", run_time(), ExportFormat::Csv)
            .unwrap()
            .unwrap();
        assert!(path.ends_with("persist_20240517_093005.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("AAPL"));

        // Clean up
        std::fs::remove_file(path).ok();
    }
}
