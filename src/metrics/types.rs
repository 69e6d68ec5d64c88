use serde::Serialize;

/// Accumulated metrics for successful probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsState {
    pub total_completed: u64,
    /// Completion order, append-only.
    pub latency_samples_ms: Vec<u64>,
    pub histogram: Vec<u64>,
}

/// Min/avg/max and percentiles over the successful samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencyStats {
    pub min_ms: u64,
    pub avg_ms: u64,
    pub max_ms: u64,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
}

impl MetricsState {
    pub(crate) fn empty(bucket_count: usize) -> Self {
        Self {
            total_completed: 0,
            latency_samples_ms: Vec::new(),
            histogram: vec![0; bucket_count],
        }
    }

    /// `sum(histogram) == total_completed == latency_samples_ms.len()`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let histogram_total = self
            .histogram
            .iter()
            .fold(0u64, |acc, count| acc.saturating_add(*count));
        let samples = u64::try_from(self.latency_samples_ms.len()).unwrap_or(u64::MAX);
        histogram_total == self.total_completed && samples == self.total_completed
    }
}
