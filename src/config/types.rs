use serde::Deserialize;

use crate::args::OutputFormat;

/// Optional settings read from `latprobe.toml` / `latprobe.json`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub rate: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
}
