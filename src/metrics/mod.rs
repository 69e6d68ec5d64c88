//! Latency aggregation, bucketed histogram state, and percentile helpers.
mod aggregator;
mod histogram;
mod types;

#[cfg(test)]
mod tests;

pub use aggregator::{
    HISTOGRAM_BUCKET_COUNT, HISTOGRAM_BUCKET_WIDTH_MS, MetricsAggregator, bucket_index,
};
pub use histogram::LatencyHistogram;
pub use types::{LatencyStats, MetricsState};
