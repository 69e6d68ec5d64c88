use std::time::Duration;

use crate::args::{
    DEFAULT_MAX_RATE, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_DELAY,
    PositiveU64, ProbeArgs,
};

/// Immutable run parameters shared by the runner and its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` runs continuously until interrupted.
    pub request_limit: Option<PositiveU64>,
    pub max_rate_per_second: PositiveU64,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            request_limit: None,
            max_rate_per_second: PositiveU64::try_from(DEFAULT_MAX_RATE)
                .unwrap_or(PositiveU64::ONE),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl From<&ProbeArgs> for RunConfig {
    fn from(args: &ProbeArgs) -> Self {
        Self {
            request_limit: args.requests,
            max_rate_per_second: args.rate,
            request_timeout: args.request_timeout,
            max_retries: args.max_retries,
            retry_delay: args.retry_delay,
        }
    }
}
