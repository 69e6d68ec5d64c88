use clap::Parser;
use std::time::Duration;

use crate::probe::ProbeTarget;

use super::defaults::DEFAULT_MAX_RETRIES;
use super::parsers::{parse_duration_arg, parse_positive_u64, parse_target};
use super::types::{OutputFormat, PositiveU64};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Sequential HTTP latency probe - rate-limited GETs with timeouts, retries, and a running latency histogram."
)]
pub struct ProbeArgs {
    /// Target URL to probe (http or https)
    #[arg(long, short, value_parser = parse_target)]
    pub url: Option<ProbeTarget>,

    /// Number of probes to run; omit for continuous monitoring until Ctrl+C
    #[arg(long = "requests", short = 'n', value_parser = parse_positive_u64)]
    pub requests: Option<PositiveU64>,

    /// Maximum probe dispatches per second
    #[arg(
        long = "rate",
        short = 'r',
        default_value = "4",
        value_parser = parse_positive_u64
    )]
    pub rate: PositiveU64,

    /// Per-attempt timeout (supports ms/s/m/h, bare numbers are ms)
    #[arg(
        long = "timeout",
        default_value = "5000ms",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Retries per probe for transient failures (429, timeouts, transport errors)
    #[arg(long = "retries", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Retry delay base, divided by --rate (supports ms/s/m/h, bare numbers are ms)
    #[arg(
        long = "retry-delay",
        default_value = "1000ms",
        value_parser = parse_duration_arg
    )]
    pub retry_delay: Duration,

    /// Report format written to stdout
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by LATPROBE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./latprobe.toml or ./latprobe.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
