//! Sequential, throttled iteration over a ticker universe.

use crate::assembler::{CompanyOutcome, RecordAssembler};
use crate::config::RunConfig;
use crate::error::FetchError;
use crate::market_value::MarketValueEstimator;
use crate::throttle::Throttle;
use indicatif::ProgressBar;
use tangible_data::MarketDataProvider;
use tangible_output::{Dataset, RunSummary};
use tracing::info;

/// Everything a run produced, including recovered failures.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Rows from every assembled company, in universe order
    pub dataset: Dataset,
    /// Size of the universe handed to the scheduler
    pub requested: usize,
    /// Companies that produced at least one row
    pub assembled: usize,
    /// Companies whose balance sheet had no periods
    pub empty: usize,
    /// Companies skipped on a profile or balance-sheet failure
    pub skipped: Vec<FetchError>,
    /// Periods whose price history could not be fetched
    pub price_failures: Vec<FetchError>,
}

impl RunReport {
    /// Whether any row was produced.
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// Counts for the end-of-run summary.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            companies_requested: self.requested,
            companies_with_rows: self.assembled,
            empty_balance_sheets: self.empty,
            companies_skipped: self.skipped.len(),
            rows: self.dataset.len(),
            failed_price_windows: self.price_failures.len(),
            unresolved_market_caps: self.dataset.unresolved_market_caps(),
            unresolved_tangible_book_values: self.dataset.unresolved_tangible_book_values(),
            output_path: None,
        }
    }

    fn record(&mut self, outcome: CompanyOutcome) {
        match outcome {
            CompanyOutcome::Assembled(company) => {
                self.assembled += 1;
                self.dataset.extend(company.rows);
                self.price_failures.extend(company.price_failures);
            }
            CompanyOutcome::EmptyBalanceSheet => self.empty += 1,
            CompanyOutcome::Skipped(err) => self.skipped.push(err),
        }
    }
}

/// Processes companies one at a time, pausing between them.
pub struct Scheduler<'a> {
    assembler: RecordAssembler<'a>,
    throttle: Box<dyn Throttle>,
    progress_interval: usize,
}

impl<'a> Scheduler<'a> {
    /// Build a scheduler from a run configuration.
    pub fn new(provider: &'a dyn MarketDataProvider, config: &RunConfig) -> Self {
        let assembler = RecordAssembler::new(provider)
            .with_estimator(MarketValueEstimator::new(config.window_days));
        Self {
            assembler,
            throttle: config.throttle(),
            progress_interval: config.progress_interval.max(1),
        }
    }

    /// Replace the throttle.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Box<dyn Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    /// Assembler used for each company.
    pub const fn assembler(&self) -> &RecordAssembler<'a> {
        &self.assembler
    }

    /// Run over the universe. An empty universe is a valid, empty run.
    pub async fn run(&self, symbols: &[String], progress: Option<&ProgressBar>) -> RunReport {
        let total = symbols.len();
        let mut report = RunReport {
            requested: total,
            ..RunReport::default()
        };
        info!("Processing {} tickers...", total);

        if let Some(pb) = progress {
            pb.set_length(total as u64);
            pb.set_position(0);
        }

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                self.throttle.pause().await;
            }
            if i % self.progress_interval == 0 {
                info!("Processing {}/{} ({})", i + 1, total, symbol);
            }
            if let Some(pb) = progress {
                pb.set_message(symbol.clone());
            }

            let outcome = self.assembler.assemble(symbol).await;
            report.record(outcome);

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        info!(
            rows = report.dataset.len(),
            assembled = report.assembled,
            empty = report.empty,
            skipped = report.skipped.len(),
            "Run finished"
        );
        report
    }
}

impl std::fmt::Debug for Scheduler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("assembler", &self.assembler)
            .field("throttle", &self.throttle)
            .field("progress_interval", &self.progress_interval)
            .finish()
    }
}
