use crate::metrics::LatencyStats;

use super::runner::{RunReport, RunState};

/// Divisor for the x100 fixed-point success rate.
const PERCENT_DIVISOR: u64 = 100;

pub(crate) fn summary_lines(report: &RunReport, latency: &LatencyStats) -> Vec<String> {
    let tally = &report.tally;
    let mut lines = Vec::new();

    let state = match report.state {
        RunState::Completed => "completed",
        RunState::Interrupted => "interrupted",
        RunState::Idle | RunState::Running => "unfinished",
    };
    lines.push(format!("Run {} after {}s", state, report.elapsed.as_secs()));
    lines.push(format!("Probes dispatched: {}", tally.dispatched));
    let rate_x100 = success_rate_x100(tally.succeeded, tally.dispatched);
    lines.push(format!(
        "Succeeded: {} ({}.{:02}%)",
        tally.succeeded,
        rate_x100 / PERCENT_DIVISOR,
        rate_x100 % PERCENT_DIVISOR
    ));
    lines.push(format!(
        "Abandoned: {} ({} not retryable, {} retries exhausted)",
        tally.abandoned(),
        tally.abandoned_terminal,
        tally.abandoned_exhausted
    ));
    lines.push(format!("Retries: {}", tally.retries));

    if tally.succeeded > 0 {
        lines.push(format!(
            "Min/Avg/Max Latency: {}ms / {}ms / {}ms",
            latency.min_ms, latency.avg_ms, latency.max_ms
        ));
        lines.push(format!(
            "P50/P90/P99 Latency: {}ms / {}ms / {}ms",
            latency.p50_ms, latency.p90_ms, latency.p99_ms
        ));
    }

    lines
}

fn success_rate_x100(success: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(success)
        .saturating_mul(10_000)
        .checked_div(u128::from(total))
        .unwrap_or(0);
    u64::try_from(scaled).map_or(u64::MAX, |value| value)
}
