use std::time::Duration;

use rand::Rng;
use seatwatch_core::RetryConfig;

/// Add up to `jitter_percent` of random jitter to `base_ms`.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}

/// Delay before retry number `attempt` (0-based) under `cfg`.
pub fn retry_delay(cfg: &RetryConfig, attempt: u32) -> Duration {
    let base = cfg.base_delay_ms(attempt);
    Duration::from_millis(jitter_wait(base, u32::from(cfg.jitter_percent.min(100))))
}
