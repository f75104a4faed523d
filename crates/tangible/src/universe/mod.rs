//! Ticker universes for a dataset build.
//!
//! A universe is an ordered list of ticker symbols. Sources may fail; the
//! caller decides whether a failure degrades to an empty universe.

pub mod file;
pub mod sp500;

pub use file::TickerFile;
pub use sp500::{SP500_WIKIPEDIA_URL, Sp500Wikipedia, parse_constituents};

use async_trait::async_trait;
use tangible_data::Result;
use tangible_engine::FetchError;
use tracing::{info, warn};

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Ordered, de-duplicated list of ticker symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerUniverse {
    symbols: Vec<String>,
}

impl TickerUniverse {
    /// Build a universe, trimming symbols and dropping blanks and repeats.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if !symbol.is_empty() && !unique.iter().any(|s| s == symbol) {
                unique.push(symbol.to_string());
            }
        }
        Self { symbols: unique }
    }

    /// Parse a comma-separated list such as `AAPL,MSFT,BRK.B`.
    pub fn from_csv_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Keep at most `limit` symbols.
    #[must_use]
    pub fn truncated(mut self, limit: usize) -> Self {
        self.symbols.truncate(limit);
        self
    }

    /// Symbols as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    /// Whether the universe has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Universe for TickerUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    fn size(&self) -> usize {
        self.symbols.len()
    }
}

/// Somewhere a universe can be loaded from.
#[async_trait]
pub trait UniverseSource: Send + Sync {
    /// Short description for log lines.
    fn describe(&self) -> String;

    /// Load the universe.
    async fn load(&self) -> Result<TickerUniverse>;
}

/// A fixed list of tickers.
#[derive(Debug, Clone, Default)]
pub struct StaticTickers(pub TickerUniverse);

#[async_trait]
impl UniverseSource for StaticTickers {
    fn describe(&self) -> String {
        format!("{} tickers from the command line", self.0.size())
    }

    async fn load(&self) -> Result<TickerUniverse> {
        Ok(self.0.clone())
    }
}

/// Load a universe, degrading to an empty one on failure.
///
/// The failure is logged and returned alongside the empty universe so the
/// caller can report it.
pub async fn load_or_empty(source: &dyn UniverseSource) -> (TickerUniverse, Option<FetchError>) {
    match source.load().await {
        Ok(universe) => {
            info!("Loaded {} tickers from {}", universe.size(), source.describe());
            (universe, None)
        }
        Err(source_err) => {
            let err = FetchError::Universe(source_err);
            warn!(source = %source.describe(), error = %err, "Could not load tickers");
            (TickerUniverse::default(), Some(err))
        }
    }
}
