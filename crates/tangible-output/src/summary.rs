//! End-of-run summary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Counts describing what a dataset build produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// Tickers in the universe.
    pub companies_requested: usize,

    /// Companies that contributed at least one row.
    pub companies_with_rows: usize,

    /// Companies whose balance sheet had no periods.
    pub empty_balance_sheets: usize,

    /// Companies skipped after a profile or balance-sheet fetch failure.
    pub companies_skipped: usize,

    /// Output rows produced.
    pub rows: usize,

    /// Price-window fetches that failed.
    pub failed_price_windows: usize,

    /// Rows without a market value estimate.
    pub unresolved_market_caps: usize,

    /// Rows without a tangible book value.
    pub unresolved_tangible_book_values: usize,

    /// Where the dataset was written, if it was.
    pub output_path: Option<PathBuf>,
}

impl RunSummary {
    /// Whether the run produced any data.
    pub const fn has_data(&self) -> bool {
        self.rows > 0
    }

    /// Record where the dataset was persisted.
    #[must_use]
    pub fn with_output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str("\nDataset Summary\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "  Companies requested:        {}\n",
            self.companies_requested
        ));
        output.push_str(&format!(
            "  Companies with rows:        {}\n",
            self.companies_with_rows
        ));
        output.push_str(&format!(
            "  Empty balance sheets:       {}\n",
            self.empty_balance_sheets
        ));
        output.push_str(&format!(
            "  Companies skipped:          {}\n",
            self.companies_skipped
        ));
        output.push_str(&format!("  Rows:                       {}\n", self.rows));
        output.push_str(&format!(
            "  Failed price windows:       {}\n",
            self.failed_price_windows
        ));
        output.push_str(&format!(
            "  Rows without market cap:    {}\n",
            self.unresolved_market_caps
        ));
        output.push_str(&format!(
            "  Rows without tangible BV:   {}\n",
            self.unresolved_tangible_book_values
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("  {self}\n"));

        output
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.output_path, self.has_data()) {
            (Some(path), _) => write!(f, "Dataset saved to {}", path.display()),
            (None, true) => write!(
                f,
                "Collected {} rows for {} companies",
                self.rows, self.companies_with_rows
            ),
            (None, false) => write!(f, "No data collected."),
        }
    }
}
