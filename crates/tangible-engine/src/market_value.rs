//! Market value estimation around a balance-sheet report date.

use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use tangible_data::PriceSeries;

/// Default half-width of the price window, in calendar days.
pub const DEFAULT_WINDOW_DAYS: u32 = 5;

/// Largest accepted half-width, in calendar days.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Calendar window of closing prices around a report date.
///
/// The window is half-open: `start` is included and `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceWindow {
    /// Report date with any time and zone stripped
    pub report_date: NaiveDate,
    /// First day of the window (inclusive)
    pub start: NaiveDate,
    /// Last day of the window (exclusive)
    pub end: NaiveDate,
}

impl PriceWindow {
    /// Whether a trading day falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Estimates market capitalization from a mean closing price.
///
/// The share count multiplied in is the company's current count, not the
/// count outstanding at the report date. Historical market caps are therefore
/// an approximation that drifts with buybacks and issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketValueEstimator {
    window_days: u32,
}

impl MarketValueEstimator {
    /// Create an estimator with the given half-width in days.
    pub const fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    /// Half-width of the price window in days.
    pub const fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Price window centered on a report date.
    ///
    /// `None` when either bound falls outside the representable calendar.
    pub fn window(&self, report_date: DateTime<FixedOffset>) -> Option<PriceWindow> {
        let report_date = normalize_report_date(report_date);
        let half = Days::new(u64::from(self.window_days));
        Some(PriceWindow {
            report_date,
            start: report_date.checked_sub_days(half)?,
            end: report_date.checked_add_days(half)?,
        })
    }

    /// Mean closing price inside the window, `None` when no trading day falls in it.
    pub fn mean_close(&self, prices: &PriceSeries, window: &PriceWindow) -> Option<f64> {
        let (sum, count) = prices
            .closes_between(window.start, window.end)
            .fold((0.0, 0_usize), |(sum, count), close| (sum + close, count + 1));

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Market capitalization for one window.
    pub fn estimate(
        &self,
        prices: &PriceSeries,
        window: &PriceWindow,
        shares_outstanding: Option<f64>,
    ) -> Option<f64> {
        market_value(self.mean_close(prices, window), shares_outstanding)
    }
}

impl Default for MarketValueEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

/// Strip time-of-day and timezone, keeping the local calendar date.
pub fn normalize_report_date(report_date: DateTime<FixedOffset>) -> NaiveDate {
    report_date.naive_local().date()
}

/// Mean price times shares, `None` if either side is unresolved.
pub fn market_value(mean_price: Option<f64>, shares_outstanding: Option<f64>) -> Option<f64> {
    Some(mean_price? * shares_outstanding?)
}
