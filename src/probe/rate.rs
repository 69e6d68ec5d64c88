use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Enforces a minimum spacing between consecutive dispatch starts.
///
/// Spacing is measured from the previous `wait()` return (or from
/// construction for the first call). Slow requests are not compensated for.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last: Instant,
}

impl RateLimiter {
    #[must_use]
    pub fn new(max_rate_per_second: u64) -> Self {
        Self {
            interval: min_interval(max_rate_per_second),
            last: Instant::now(),
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Suspends until the minimum interval since the previous dispatch has
    /// elapsed. Cancel-safe: dropping the future leaves the limiter untouched.
    pub async fn wait(&mut self) {
        let deadline = self.last.checked_add(self.interval).unwrap_or(self.last);
        sleep_until(deadline).await;
        self.last = Instant::now();
    }
}

fn min_interval(max_rate_per_second: u64) -> Duration {
    let rate = u32::try_from(max_rate_per_second.max(1)).unwrap_or(u32::MAX);
    Duration::from_secs(1)
        .checked_div(rate)
        .unwrap_or(Duration::ZERO)
}
