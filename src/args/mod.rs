//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::ProbeArgs;
pub use types::{OutputFormat, PositiveU64};

pub(crate) use defaults::{
    DEFAULT_MAX_RATE, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_DELAY,
    DEFAULT_USER_AGENT,
};
