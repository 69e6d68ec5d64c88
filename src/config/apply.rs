use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, ProbeArgs};
use crate::error::{AppError, AppResult, ConfigError};
use crate::probe::ProbeTarget;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Flags given explicitly on
/// the command line always win.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.as_deref()
    {
        let target = ProbeTarget::parse(url)
            .map_err(|err| AppError::config(ConfigError::InvalidUrl { source: err }))?;
        args.url = Some(target);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = Some(ensure_positive_u64(requests, "requests")?);
    }

    if !is_cli(matches, "rate")
        && let Some(rate) = config.rate
    {
        args.rate = ensure_positive_u64(rate, "rate")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout_ms) = config.timeout_ms
    {
        let timeout_ms = ensure_positive_u64(timeout_ms, "timeout_ms")?;
        args.request_timeout = Duration::from_millis(timeout_ms.get());
    }

    if !is_cli(matches, "max_retries")
        && let Some(retries) = config.retries
    {
        args.max_retries = retries;
    }

    if !is_cli(matches, "retry_delay")
        && let Some(delay_ms) = config.retry_delay_ms
    {
        let delay_ms = ensure_positive_u64(delay_ms, "retry_delay_ms")?;
        args.retry_delay = Duration::from_millis(delay_ms.get());
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
