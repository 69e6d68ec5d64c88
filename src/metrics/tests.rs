use super::*;

#[test]
fn bucket_index_uses_100ms_width() -> Result<(), String> {
    let cases = [(0, 0), (99, 0), (100, 1), (250, 2), (899, 8), (900, 9)];
    for (latency, expected) in cases {
        let bucket = bucket_index(latency, HISTOGRAM_BUCKET_COUNT);
        if bucket != expected {
            return Err(format!(
                "Expected bucket {} for {}ms, got {}",
                expected, latency, bucket
            ));
        }
    }
    Ok(())
}

#[test]
fn bucket_index_clamps_overflow_to_last_bucket() -> Result<(), String> {
    for latency in [1_050, 5_000, u64::MAX] {
        let bucket = bucket_index(latency, HISTOGRAM_BUCKET_COUNT);
        if bucket != HISTOGRAM_BUCKET_COUNT.saturating_sub(1) {
            return Err(format!("Expected last bucket for {}ms, got {}", latency, bucket));
        }
    }
    if bucket_index(5_000, 1) != 0 {
        return Err("Expected single bucket to absorb everything".to_owned());
    }
    Ok(())
}

#[test]
fn update_increments_bucket_for_250ms() -> Result<(), String> {
    let aggregator = MetricsAggregator::new();
    let total = aggregator.update(250);
    if total != 1 {
        return Err(format!("Expected total 1, got {}", total));
    }
    let snapshot = aggregator.snapshot();
    if snapshot.histogram.get(2) != Some(&1) {
        return Err(format!("Expected bucket 2 = 1, got {:?}", snapshot.histogram));
    }
    Ok(())
}

#[test]
fn scenario_histogram_matches_expected_distribution() -> Result<(), String> {
    let aggregator = MetricsAggregator::new();
    for latency in [50, 150, 250, 1_050, 90] {
        aggregator.update(latency);
    }
    let snapshot = aggregator.snapshot();
    if snapshot.total_completed != 5 {
        return Err(format!("Expected 5 completions, got {}", snapshot.total_completed));
    }
    if snapshot.histogram != vec![2, 1, 1, 0, 0, 0, 0, 0, 0, 1] {
        return Err(format!("Unexpected histogram {:?}", snapshot.histogram));
    }
    if snapshot.latency_samples_ms != vec![50, 150, 250, 1_050, 90] {
        return Err(format!(
            "Samples out of completion order: {:?}",
            snapshot.latency_samples_ms
        ));
    }
    Ok(())
}

#[test]
fn sum_invariant_holds_after_every_update() -> Result<(), String> {
    let aggregator = MetricsAggregator::with_buckets(5);
    if !aggregator.snapshot().is_consistent() {
        return Err("Empty state should be consistent".to_owned());
    }
    for latency in [0, 42, 499, 500, 10_000, 123, 7] {
        aggregator.update(latency);
        let snapshot = aggregator.snapshot();
        if !snapshot.is_consistent() {
            return Err(format!("Invariant broken: {:?}", snapshot));
        }
        if snapshot.histogram.len() != 5 {
            return Err("Histogram size must stay fixed".to_owned());
        }
    }
    Ok(())
}

#[test]
fn concurrent_updates_keep_invariant() -> Result<(), String> {
    let aggregator = std::sync::Arc::new(MetricsAggregator::new());
    let mut handles = Vec::new();
    for worker in 0..4u64 {
        let aggregator = aggregator.clone();
        handles.push(std::thread::spawn(move || {
            for step in 0..250u64 {
                aggregator.update(worker.saturating_mul(300).saturating_add(step));
                if !aggregator.snapshot().is_consistent() {
                    return false;
                }
            }
            true
        }));
    }
    for handle in handles {
        let consistent = handle
            .join()
            .map_err(|_panic| "Worker thread panicked".to_owned())?;
        if !consistent {
            return Err("Observed inconsistent snapshot".to_owned());
        }
    }
    let snapshot = aggregator.snapshot();
    if snapshot.total_completed != 1_000 || !snapshot.is_consistent() {
        return Err(format!("Unexpected final total {}", snapshot.total_completed));
    }
    Ok(())
}

#[test]
fn latency_stats_reports_min_avg_max() -> Result<(), String> {
    let aggregator = MetricsAggregator::new();
    for latency in [100, 200, 300, 400] {
        aggregator.update(latency);
    }
    let stats = aggregator.snapshot().latency_stats()?;
    if stats.min_ms != 100 || stats.max_ms != 400 || stats.avg_ms != 250 {
        return Err(format!("Unexpected stats {:?}", stats));
    }
    if stats.p50_ms < 100 || stats.p50_ms > 300 {
        return Err(format!("Unexpected p50 {}", stats.p50_ms));
    }
    if stats.p99_ms != 400 {
        return Err(format!("Unexpected p99 {}", stats.p99_ms));
    }
    Ok(())
}

#[test]
fn latency_stats_empty_is_zeroed() -> Result<(), String> {
    let stats = MetricsAggregator::new().snapshot().latency_stats()?;
    if stats != LatencyStats::default() {
        return Err(format!("Expected zeroed stats, got {:?}", stats));
    }
    Ok(())
}

#[test]
fn latency_histogram_percentiles_empty() -> Result<(), String> {
    let histogram = LatencyHistogram::new()?;
    if histogram.percentiles() != (0, 0, 0) || histogram.count() != 0 {
        return Err("Expected empty histogram".to_owned());
    }
    Ok(())
}
