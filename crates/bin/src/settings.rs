//! Build settings assembled from CLI flags and an optional config file.

use clap::Args;
use std::path::PathBuf;
use tangible::engine::{ConfigError, RunConfig};
use tangible::output::{DEFAULT_PREFIX, ExportError, ExportFormat};

/// Flags of the `build` subcommand.
#[derive(Debug, Args)]
pub(crate) struct BuildArgs {
    /// Comma-separated tickers instead of the S&P 500 list
    #[arg(long, conflicts_with = "universe_file")]
    pub(crate) tickers: Option<String>,

    /// CSV file with a Symbol column, or one ticker per line
    #[arg(long)]
    pub(crate) universe_file: Option<PathBuf>,

    /// Process at most this many tickers
    #[arg(long)]
    pub(crate) limit: Option<usize>,

    /// JSON run configuration; flags below override its values
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Pause between companies in milliseconds
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,

    /// Companies per minute (token bucket instead of a fixed pause)
    #[arg(long)]
    pub(crate) requests_per_minute: Option<u32>,

    /// Half-width of the price window around each report date, in days
    #[arg(long)]
    pub(crate) window_days: Option<u32>,

    /// Directory the dataset is written to
    #[arg(long, default_value = ".")]
    pub(crate) output_dir: PathBuf,

    /// Output format: csv, json or pretty-json
    #[arg(long, default_value = "csv")]
    pub(crate) format: String,

    /// File name prefix, followed by a timestamp
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub(crate) prefix: String,
}

/// Where and how the dataset is persisted.
#[derive(Debug, Clone)]
pub(crate) struct ExportConfig {
    pub(crate) output_dir: PathBuf,
    pub(crate) format: ExportFormat,
    pub(crate) prefix: String,
}

impl BuildArgs {
    /// Run configuration: file values (or defaults) with flag overrides applied.
    pub(crate) fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(delay_ms) = self.delay_ms {
            config.inter_company_delay_ms = delay_ms;
        }
        if let Some(rate) = self.requests_per_minute {
            config.requests_per_minute = Some(rate);
        }
        if let Some(window_days) = self.window_days {
            config.window_days = window_days;
        }

        config.validate()?;
        Ok(config)
    }

    /// Export settings.
    pub(crate) fn export_config(&self) -> Result<ExportConfig, ExportError> {
        Ok(ExportConfig {
            output_dir: self.output_dir.clone(),
            format: self.format.parse()?,
            prefix: self.prefix.clone(),
        })
    }
}
