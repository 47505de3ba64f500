//! Exponential delay between attempts.

use std::time::Duration;

use async_trait::async_trait;

/// Delay to wait after `attempt` (1-based) failed: `2^attempt` seconds.
///
/// There is no jitter and no cap; the attempt budget bounds growth.
#[must_use]
pub const fn delay_for_attempt(attempt: u32) -> Duration {
    Duration::from_secs(2_u64.saturating_pow(attempt))
}

/// Suspends the executor between attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for `delay` to elapse.
    async fn sleep(&self, delay: Duration);
}

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
