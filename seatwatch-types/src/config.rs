//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Parameters that shape the anchor grid for one reconstruction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Spacing between consecutive anchors; the resolution of the reconstructed timeline.
    pub interval: Duration,
    /// Span of each windowed query. Must be at least `interval`.
    pub window: Duration,
    /// Explicit start time-of-day. Defaults to the earliest area opening time.
    pub start: Option<NaiveTime>,
    /// Explicit end time-of-day (exclusive). Defaults to the latest area closing time.
    pub end: Option<NaiveTime>,
    /// Plan the grid on tomorrow's date instead of today's.
    pub tomorrow: bool,
    /// Clamp the start forward to "now" so elapsed windows are never queried.
    pub truncate_start: bool,
    /// Round the start up to this many minutes, then add one more unit.
    ///
    /// The unit must divide 60 (5, 10, 15, 20, 30, 60, ...); other values are
    /// rejected when the grid is planned.
    pub align_start_minute: Option<u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15 * 60),
            window: Duration::from_secs(30 * 60),
            start: None,
            end: None,
            tomorrow: false,
            truncate_start: true,
            align_start_minute: Some(15),
        }
    }
}

impl GridConfig {
    /// Same grid, planned on tomorrow's date.
    #[must_use]
    pub fn for_tomorrow(&self) -> Self {
        Self {
            tomorrow: true,
            ..self.clone()
        }
    }
}

/// Retry policy for transient window query failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retries after the first attempt; 0 disables retrying.
    pub max_retries: u32,
    /// Minimum backoff delay in milliseconds.
    pub min_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor to increase delay after each failure (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            min_backoff_ms: 250,
            max_backoff_ms: 5_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

impl RetryConfig {
    /// Never retry; the first failure is final.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Base delay (before jitter) preceding retry number `attempt` (0-based).
    #[must_use]
    pub fn base_delay_ms(&self, attempt: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..attempt {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                return self.max_backoff_ms;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Global configuration for the `SeatWatch` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatWatchConfig {
    /// Grid used by `snapshot` and as the default for `availability`.
    pub grid: GridConfig,
    /// Maximum simultaneous window queries. `None` fans out the whole grid at once.
    pub max_concurrency: Option<usize>,
    /// Timeout for each individual window query.
    pub request_timeout: Duration,
    /// Optional deadline for the whole fetch phase of one run.
    pub run_timeout: Option<Duration>,
    /// Retry policy for transient query failures.
    pub retry: RetryConfig,
    /// Time zone the facility's opening hours are expressed in.
    pub time_zone: Tz,
}

impl Default for SeatWatchConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            max_concurrency: Some(8),
            request_timeout: Duration::from_secs(10),
            run_timeout: None,
            retry: RetryConfig::default(),
            time_zone: chrono_tz::Asia::Singapore,
        }
    }
}
