//! Probe primitives: target, outcome classification, retry policy, pacing,
//! and single-request execution.
mod executor;
mod outcome;
mod rate;
mod retry;
mod run_config;
mod target;

#[cfg(test)]
pub(crate) mod test_support;

pub use executor::{Attempt, HttpExecutor, RequestExecutor};
pub use outcome::{Outcome, OutcomeKind, RawResponse, classify};
pub use rate::RateLimiter;
pub use retry::{AbandonReason, ProbeResolution, RetryPolicy, Transition};
pub use run_config::RunConfig;
pub use target::ProbeTarget;
