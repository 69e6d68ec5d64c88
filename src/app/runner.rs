use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::metrics::{MetricsAggregator, MetricsState};
use crate::probe::{
    AbandonReason, ProbeResolution, ProbeTarget, RateLimiter, RequestExecutor, RetryPolicy,
    RunConfig,
};
use crate::shutdown::ShutdownReceiver;

use super::report::Reporter;

/// Successful completions between intermediate snapshots.
const SNAPSHOT_EVERY: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Interrupted,
}

/// Per-run probe counters; unlike [`MetricsState`] these include failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeTally {
    pub dispatched: u64,
    pub succeeded: u64,
    pub abandoned_terminal: u64,
    pub abandoned_exhausted: u64,
    pub retries: u64,
}

impl ProbeTally {
    #[must_use]
    pub const fn abandoned(&self) -> u64 {
        self.abandoned_terminal.saturating_add(self.abandoned_exhausted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub state: RunState,
    pub elapsed: Duration,
    pub tally: ProbeTally,
    pub snapshot: MetricsState,
}

/// Sequential probe loop: pace, probe to resolution, record, repeat.
pub struct Runner<E> {
    executor: E,
    target: ProbeTarget,
    config: RunConfig,
    metrics: Arc<MetricsAggregator>,
    reporter: Reporter,
    state: RunState,
}

impl<E> Runner<E>
where
    E: RequestExecutor,
{
    pub const fn new(
        executor: E,
        target: ProbeTarget,
        config: RunConfig,
        metrics: Arc<MetricsAggregator>,
        reporter: Reporter,
    ) -> Self {
        Self {
            executor,
            target,
            config,
            metrics,
            reporter,
            state: RunState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Runs until the request limit is reached or shutdown is signalled.
    ///
    /// The shutdown signal is only observed between probes: an attempt or
    /// retry delay in progress always runs to resolution first.
    pub async fn run(&mut self, shutdown_rx: &mut ShutdownReceiver) -> RunReport {
        self.state = RunState::Running;
        let rate = self.config.max_rate_per_second.get();
        match self.config.request_limit {
            Some(limit) => info!(
                "Probing {} with {} requests at up to {}/s",
                self.target,
                limit.get(),
                rate
            ),
            None => info!(
                "Probing {} continuously at up to {}/s (Ctrl+C to stop)",
                self.target, rate
            ),
        }

        let run_start = Instant::now();
        let policy = RetryPolicy::new(self.config.max_retries, self.config.retry_delay, rate);
        let mut limiter = RateLimiter::new(rate);
        let mut tally = ProbeTally::default();
        let mut listening = true;

        loop {
            if let Some(limit) = self.config.request_limit
                && tally.dispatched >= limit.get()
            {
                self.state = RunState::Completed;
                break;
            }
            if interrupt_requested(shutdown_rx, &mut listening)
                || pace(&mut limiter, shutdown_rx, &mut listening).await
            {
                self.state = RunState::Interrupted;
                break;
            }

            tally.dispatched = tally.dispatched.saturating_add(1);
            let sequence = tally.dispatched;
            let resolution = policy
                .run(&self.executor, &self.target, self.config.request_timeout)
                .await;
            self.record(sequence, resolution, &mut tally);
        }

        let report = RunReport {
            state: self.state,
            elapsed: run_start.elapsed(),
            tally,
            snapshot: self.metrics.snapshot(),
        };
        info!(
            "Run {:?} after {} probes ({} succeeded)",
            report.state, tally.dispatched, tally.succeeded
        );
        self.reporter.summary(&report);
        report
    }

    fn record(&mut self, sequence: u64, resolution: ProbeResolution, tally: &mut ProbeTally) {
        match resolution {
            ProbeResolution::Success {
                latency_ms,
                retries,
            } => {
                tally.succeeded = tally.succeeded.saturating_add(1);
                tally.retries = tally.retries.saturating_add(u64::from(retries));
                let completed = self.metrics.update(latency_ms);
                self.reporter.probe(sequence, latency_ms);
                if completed.checked_rem(SNAPSHOT_EVERY) == Some(0) {
                    let snapshot = self.metrics.snapshot();
                    self.reporter.snapshot(&snapshot);
                }
            }
            ProbeResolution::Abandoned { reason, retries } => {
                tally.retries = tally.retries.saturating_add(u64::from(retries));
                match reason {
                    AbandonReason::Terminal(outcome) => {
                        tally.abandoned_terminal = tally.abandoned_terminal.saturating_add(1);
                        warn!(
                            "Probe #{} abandoned: {} is not retryable (attempt {})",
                            sequence, outcome, retries
                        );
                    }
                    AbandonReason::Exhausted(outcome) => {
                        tally.abandoned_exhausted = tally.abandoned_exhausted.saturating_add(1);
                        warn!(
                            "Probe #{} abandoned after {} retries; last outcome: {}",
                            sequence, retries, outcome
                        );
                    }
                }
            }
        }
    }
}

fn interrupt_requested(shutdown_rx: &mut ShutdownReceiver, listening: &mut bool) -> bool {
    if !*listening {
        return false;
    }
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Closed) => {
            *listening = false;
            false
        }
    }
}

/// Waits for the next dispatch slot. Returns `true` when shutdown arrived
/// first; no probe is in flight at this point.
async fn pace(
    limiter: &mut RateLimiter,
    shutdown_rx: &mut ShutdownReceiver,
    listening: &mut bool,
) -> bool {
    loop {
        if !*listening {
            limiter.wait().await;
            return false;
        }
        tokio::select! {
            biased;
            signal = shutdown_rx.recv() => match signal {
                Ok(()) | Err(RecvError::Lagged(_)) => return true,
                Err(RecvError::Closed) => *listening = false,
            },
            () = limiter.wait() => return false,
        }
    }
}
