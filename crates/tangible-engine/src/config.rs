//! Run configuration.

use crate::error::ConfigError;
use crate::market_value::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::throttle::{FixedDelay, NoThrottle, Throttle, TokenBucket};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::Path;

/// Default pause between companies, in milliseconds.
pub const DEFAULT_INTER_COMPANY_DELAY_MS: u64 = 1_000;

/// Default number of companies between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

/// Parameters of one dataset build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Half-width of the price window around each report date, in days
    pub window_days: u32,
    /// Fixed pause between companies, in milliseconds
    pub inter_company_delay_ms: u64,
    /// Companies per minute; replaces the fixed pause with a token bucket
    pub requests_per_minute: Option<u32>,
    /// Companies between progress log lines
    pub progress_interval: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            inter_company_delay_ms: DEFAULT_INTER_COMPANY_DELAY_MS,
            requests_per_minute: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scheduler cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(ConfigError::Invalid {
                field: "window_days",
                reason: format!("must be between 1 and {MAX_WINDOW_DAYS}"),
            });
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "progress_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.requests_per_minute == Some(0) {
            return Err(ConfigError::Invalid {
                field: "requests_per_minute",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Throttle implied by this configuration.
    ///
    /// A rate takes precedence over the fixed delay; a zero delay disables pacing.
    pub fn throttle(&self) -> Box<dyn Throttle> {
        if let Some(rate) = self.requests_per_minute.and_then(NonZeroU32::new) {
            Box::new(TokenBucket::per_minute(rate))
        } else if self.inter_company_delay_ms == 0 {
            Box::new(NoThrottle)
        } else {
            Box::new(FixedDelay::from_millis(self.inter_company_delay_ms))
        }
    }
}
