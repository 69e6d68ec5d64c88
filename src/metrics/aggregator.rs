use std::sync::{Mutex, MutexGuard, PoisonError};

use super::types::MetricsState;

/// Number of histogram buckets; the last one catches everything at or above
/// `(HISTOGRAM_BUCKET_COUNT - 1) * HISTOGRAM_BUCKET_WIDTH_MS`.
pub const HISTOGRAM_BUCKET_COUNT: usize = 10;
pub const HISTOGRAM_BUCKET_WIDTH_MS: u64 = 100;

/// Thread-safe accumulator for successful probe latencies.
///
/// `update` and `snapshot` are mutually exclusive, so every observed state
/// satisfies `sum(histogram) == total_completed == latency_samples_ms.len()`.
#[derive(Debug)]
pub struct MetricsAggregator {
    state: Mutex<MetricsState>,
}

impl MetricsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(HISTOGRAM_BUCKET_COUNT)
    }

    /// Creates an aggregator with `bucket_count` buckets (at least one).
    #[must_use]
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self {
            state: Mutex::new(MetricsState::empty(bucket_count.max(1))),
        }
    }

    /// Records one successful latency and returns the new completed total.
    pub fn update(&self, latency_ms: u64) -> u64 {
        let mut state = self.lock();
        let bucket = bucket_index(latency_ms, state.histogram.len());
        state.latency_samples_ms.push(latency_ms);
        if let Some(count) = state.histogram.get_mut(bucket) {
            *count = count.saturating_add(1);
        }
        state.total_completed = state.total_completed.saturating_add(1);
        state.total_completed
    }

    /// Copies the current state. The lock is released before the caller
    /// does any reporting I/O.
    #[must_use]
    pub fn snapshot(&self) -> MetricsState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket for a latency: `floor(latency / width)`, clamped to the last bucket.
#[must_use]
pub fn bucket_index(latency_ms: u64, bucket_count: usize) -> usize {
    let raw = latency_ms
        .checked_div(HISTOGRAM_BUCKET_WIDTH_MS)
        .unwrap_or(0);
    usize::try_from(raw)
        .unwrap_or(usize::MAX)
        .min(bucket_count.saturating_sub(1))
}
