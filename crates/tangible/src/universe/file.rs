//! Ticker lists stored on disk.
//!
//! Two layouts are accepted: a CSV file whose header has a `Symbol` column,
//! or a plain list with one ticker per line. Lines starting with `#` are
//! ignored in both.

use super::{TickerUniverse, UniverseSource};
use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};
use tangible_data::Result;

const SYMBOL_COLUMN: &str = "symbol";

/// Universe read from a local file.
#[derive(Debug, Clone)]
pub struct TickerFile {
    path: PathBuf,
}

impl TickerFile {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file synchronously.
    pub fn read(&self) -> Result<TickerUniverse> {
        let file = std::fs::File::open(&self.path)?;
        read_tickers(file)
    }
}

#[async_trait]
impl UniverseSource for TickerFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<TickerUniverse> {
        self.read()
    }
}

/// Parse tickers from CSV or line-per-ticker input.
pub fn read_tickers<R: Read>(reader: R) -> Result<TickerUniverse> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record?);
    }

    let symbol_column = records.first().and_then(|header| {
        header
            .iter()
            .position(|field| field.eq_ignore_ascii_case(SYMBOL_COLUMN))
    });

    let symbols = match symbol_column {
        Some(column) => records
            .iter()
            .skip(1)
            .filter_map(|record| record.get(column))
            .map(str::to_string)
            .collect::<Vec<_>>(),
        None => records
            .iter()
            .filter_map(|record| record.get(0))
            .map(str::to_string)
            .collect(),
    };

    Ok(TickerUniverse::new(symbols))
}
