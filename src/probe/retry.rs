use std::time::Duration;

use tracing::{debug, warn};

use super::executor::RequestExecutor;
use super::outcome::Outcome;
use super::target::ProbeTarget;

/// Why a probe gave up without a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    /// Client or server error; retrying cannot fix it.
    Terminal(Outcome),
    /// Every allowed retry failed with a transient outcome.
    Exhausted(Outcome),
}

/// Final state of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResolution {
    Success { latency_ms: u64, retries: u32 },
    Abandoned { reason: AbandonReason, retries: u32 },
}

/// Result of feeding one attempt outcome into the policy while in
/// `Attempting(attempt)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Resolved(ProbeResolution),
    Retry {
        next_attempt: u32,
        delay: Duration,
        outcome: Outcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Builds a policy whose backoff is `retry_delay / max_rate_per_second`.
    #[must_use]
    pub fn new(max_retries: u32, retry_delay: Duration, max_rate_per_second: u64) -> Self {
        let divisor = u32::try_from(max_rate_per_second.max(1)).unwrap_or(u32::MAX);
        let delay = retry_delay.checked_div(divisor).unwrap_or(Duration::ZERO);
        Self { max_retries, delay }
    }

    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Applies one outcome to the state `Attempting(attempt)`.
    ///
    /// `attempt` is clamped to `max_retries`, so the policy can never move
    /// past `Attempting(max_retries)`.
    #[must_use]
    pub fn transition(&self, attempt: u32, outcome: Outcome) -> Transition {
        let attempt = attempt.min(self.max_retries);
        if let Outcome::Success { latency_ms } = outcome {
            return Transition::Resolved(ProbeResolution::Success {
                latency_ms,
                retries: attempt,
            });
        }
        if !outcome.kind().is_retryable() {
            return Transition::Resolved(ProbeResolution::Abandoned {
                reason: AbandonReason::Terminal(outcome),
                retries: attempt,
            });
        }
        if attempt < self.max_retries {
            return Transition::Retry {
                next_attempt: attempt.saturating_add(1),
                delay: self.delay,
                outcome,
            };
        }
        Transition::Resolved(ProbeResolution::Abandoned {
            reason: AbandonReason::Exhausted(outcome),
            retries: attempt,
        })
    }

    /// Drives one probe to resolution: execute, classify, and retry until
    /// the policy reaches a terminal state.
    pub async fn run<E>(
        &self,
        executor: &E,
        target: &ProbeTarget,
        timeout: Duration,
    ) -> ProbeResolution
    where
        E: RequestExecutor + ?Sized,
    {
        let mut attempt: u32 = 0;
        loop {
            let result = executor.execute(target, timeout).await;
            debug!(
                "Attempt {} finished: {} after {}ms",
                attempt, result.outcome, result.latency_ms
            );
            match self.transition(attempt, result.outcome) {
                Transition::Resolved(resolution) => return resolution,
                Transition::Retry {
                    next_attempt,
                    delay,
                    outcome,
                } => {
                    warn!(
                        "Attempt {} failed ({}); retrying in {}ms ({}/{})",
                        attempt,
                        outcome,
                        delay.as_millis(),
                        next_attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt = next_attempt;
                }
            }
        }
    }
}
