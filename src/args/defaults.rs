use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("latprobe/", env!("CARGO_PKG_VERSION"));

/// Probes per second when `--rate` is not given.
pub(crate) const DEFAULT_MAX_RATE: u64 = 4;
/// Hard per-attempt deadline.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);
/// Retry delay base; the effective delay is divided by the probe rate.
pub(crate) const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;
