//! Pacing policies applied between companies.
//!
//! The scheduler owns the throttle; nothing in field resolution or valuation
//! knows that requests are being paced.

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Wait policy invoked before each company after the first.
#[async_trait]
pub trait Throttle: Send + Sync + fmt::Debug {
    /// Wait until the next company may be processed.
    async fn pause(&self);
}

/// No pacing at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self) {}
}

/// Fixed sleep between companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// Delay of the given number of milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self(Duration::from_secs(1))
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Token bucket admitting a fixed number of companies per minute, one at a time.
pub struct TokenBucket {
    limiter: Limiter,
    per_minute: NonZeroU32,
}

impl TokenBucket {
    /// Bucket refilling `per_minute` tokens per minute with a burst of one.
    pub fn per_minute(per_minute: NonZeroU32) -> Self {
        let quota = Quota::per_minute(per_minute).allow_burst(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(quota),
            per_minute,
        }
    }

    /// Configured rate.
    pub const fn rate(&self) -> NonZeroU32 {
        self.per_minute
    }
}

impl fmt::Debug for TokenBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenBucket")
            .field("per_minute", &self.per_minute)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Throttle for TokenBucket {
    async fn pause(&self) {
        debug!(per_minute = self.per_minute.get(), "Waiting for rate limit");
        self.limiter.until_ready().await;
    }
}
