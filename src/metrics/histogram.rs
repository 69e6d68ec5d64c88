use hdrhistogram::Histogram;

use super::types::{LatencyStats, MetricsState};

#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, String> {
        let hist = Histogram::<u64>::new(3)
            .map_err(|err| format!("Failed to create histogram: {}", err))?;
        Ok(Self { hist })
    }

    /// Build a histogram from recorded samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created or a value cannot
    /// be recorded.
    pub fn from_samples(samples: &[u64]) -> Result<Self, String> {
        let mut histogram = Self::new()?;
        for sample in samples {
            histogram.record(*sample)?;
        }
        Ok(histogram)
    }

    /// Record a latency value in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency_ms: u64) -> Result<(), String> {
        let value = latency_ms.max(1);
        self.hist
            .record(value)
            .map_err(|err| format!("Failed to record latency: {}", err))
    }

    #[must_use]
    pub fn percentiles(&self) -> (u64, u64, u64) {
        let count = self.count();
        if count == 0 {
            return (0, 0, 0);
        }

        (
            self.hist.value_at_quantile(0.5),
            self.hist.value_at_quantile(0.9),
            self.hist.value_at_quantile(0.99),
        )
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}

impl MetricsState {
    /// Summary statistics for the recorded samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentile histogram cannot be built.
    pub fn latency_stats(&self) -> Result<LatencyStats, String> {
        let samples = &self.latency_samples_ms;
        let Some(min_ms) = samples.iter().copied().min() else {
            return Ok(LatencyStats::default());
        };
        let max_ms = samples.iter().copied().max().unwrap_or(min_ms);
        let sum = samples
            .iter()
            .fold(0u128, |acc, value| acc.saturating_add(u128::from(*value)));
        let count = u128::try_from(samples.len()).unwrap_or(u128::MAX);
        let avg_ms = u64::try_from(sum.checked_div(count).unwrap_or(0)).unwrap_or(u64::MAX);

        let (p50_ms, p90_ms, p99_ms) = LatencyHistogram::from_samples(samples)?.percentiles();
        Ok(LatencyStats {
            min_ms,
            avg_ms,
            max_ms,
            p50_ms,
            p90_ms,
            p99_ms,
        })
    }
}
