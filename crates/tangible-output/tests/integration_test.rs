//! Integration tests for dataset persistence and the run summary.

use chrono::NaiveDate;
use std::path::PathBuf;
use tangible_output::{COLUMNS, Dataset, ExportFormat, OutputRow, RunSummary, persist};

fn row(ticker: &str, year: i32, market_cap: Option<f64>, goodwill: Option<f64>) -> OutputRow {
    OutputRow {
        ticker: ticker.to_string(),
        company_name: format!("{ticker} Holdings"),
        industry: "Financial Data & Stock Exchanges".to_string(),
        sector: "Financial Services".to_string(),
        year,
        market_cap,
        tangible_book_value: Some(450.0),
        goodwill,
        other_intangible_assets: Some(50.0),
        multiplier: 0.45,
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tangible_output_{}_{}", name, std::process::id()))
}

#[test]
fn test_persist_and_read_back_csv() {
    let dataset: Dataset = vec![
        row("SPGI", 2023, Some(1.25e11), Some(100.0)),
        row("SPGI", 2022, None, None),
    ]
    .into_iter()
    .collect();

    let dir = scratch_dir("csv");
    let at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 5)
        .unwrap();
    let path = persist(&dataset, &dir, "sp500_financial_dataset", at, ExportFormat::Csv)
        .unwrap()
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "sp500_financial_dataset_20240301_093005.csv"
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, COLUMNS);

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "SPGI");
    assert_eq!(&records[0][4], "2023");
    assert_eq!(&records[1][5], "");
    assert_eq!(&records[1][7], "");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_empty_dataset_is_not_persisted() {
    let dir = scratch_dir("empty");
    let at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let path = persist(&Dataset::new(), &dir, "sp500_financial_dataset", at, ExportFormat::Json)
        .unwrap();

    assert!(path.is_none());
    assert!(!dir.exists());

    let summary = RunSummary::default().with_output_path(path);
    assert_eq!(summary.to_string(), "No data collected.");
}

#[test]
fn test_json_export_and_summary() {
    let dataset: Dataset = vec![row("MCO", 2023, Some(6.0e10), Some(10.0))]
        .into_iter()
        .collect();

    let dir = scratch_dir("json");
    let at = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let path = persist(&dataset, &dir, "mco", at, ExportFormat::PrettyJson)
        .unwrap()
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["Ticker"], "MCO");
    assert_eq!(value[0]["Other Intangible Assets"], 50.0);

    let summary = RunSummary {
        companies_requested: 1,
        companies_with_rows: dataset.company_count(),
        rows: dataset.len(),
        ..RunSummary::default()
    }
    .with_output_path(Some(path.clone()));
    assert!(summary.has_data());
    assert_eq!(summary.to_string(), format!("Dataset saved to {}", path.display()));

    std::fs::remove_dir_all(&dir).ok();
}
