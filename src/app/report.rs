use std::io::Write;

use serde::Serialize;
use tracing::warn;

use crate::args::OutputFormat;
use crate::metrics::{LatencyStats, MetricsState};

use super::runner::{ProbeTally, RunReport, RunState};
use super::summary::summary_lines;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ReportEvent<'a> {
    Probe {
        sequence: u64,
        latency_ms: u64,
    },
    Snapshot {
        total_completed: u64,
        latency_samples_ms: &'a [u64],
        histogram: &'a [u64],
    },
    Summary {
        state: RunState,
        elapsed_ms: u64,
        tally: &'a ProbeTally,
        latency: LatencyStats,
        metrics: &'a MetricsState,
    },
}

/// Writes probe lines, periodic snapshots, and the final summary.
///
/// Write failures are logged and otherwise ignored so a closed stdout never
/// stops the probe loop.
pub struct Reporter {
    format: OutputFormat,
    out: Box<dyn Write + Send>,
}

impl Reporter {
    #[must_use]
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(format, Box::new(std::io::stdout()))
    }

    #[must_use]
    pub const fn new(format: OutputFormat, out: Box<dyn Write + Send>) -> Self {
        Self { format, out }
    }

    pub fn probe(&mut self, sequence: u64, latency_ms: u64) {
        match self.format {
            OutputFormat::Text => {
                self.write_line(&format!("#{} {} ms", sequence, latency_ms));
            }
            OutputFormat::Json => self.write_event(&ReportEvent::Probe {
                sequence,
                latency_ms,
            }),
        }
    }

    pub fn snapshot(&mut self, state: &MetricsState) {
        match self.format {
            OutputFormat::Text => {
                for line in snapshot_lines(state) {
                    self.write_line(&line);
                }
            }
            OutputFormat::Json => self.write_event(&ReportEvent::Snapshot {
                total_completed: state.total_completed,
                latency_samples_ms: &state.latency_samples_ms,
                histogram: &state.histogram,
            }),
        }
    }

    pub fn summary(&mut self, report: &RunReport) {
        let latency = match report.snapshot.latency_stats() {
            Ok(stats) => stats,
            Err(err) => {
                warn!("Failed to compute latency percentiles: {}", err);
                LatencyStats::default()
            }
        };
        match self.format {
            OutputFormat::Text => {
                for line in summary_lines(report, &latency) {
                    self.write_line(&line);
                }
                for line in snapshot_lines(&report.snapshot) {
                    self.write_line(&line);
                }
            }
            OutputFormat::Json => self.write_event(&ReportEvent::Summary {
                state: report.state,
                elapsed_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
                tally: &report.tally,
                latency,
                metrics: &report.snapshot,
            }),
        }
        if let Err(err) = self.out.flush() {
            warn!("Failed to flush report output: {}", err);
        }
    }

    fn write_event(&mut self, event: &ReportEvent<'_>) {
        match serde_json::to_string(event) {
            Ok(line) => self.write_line(&line),
            Err(err) => warn!("Failed to serialize report event: {}", err),
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{}", line) {
            warn!("Failed to write report output: {}", err);
        }
    }
}

fn snapshot_lines(state: &MetricsState) -> [String; 3] {
    [
        format!("Total completed: {}", state.total_completed),
        format!("Latency samples (ms): {:?}", state.latency_samples_ms),
        format!("Histogram (100ms buckets): {:?}", state.histogram),
    ]
}
