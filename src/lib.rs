//! Core library for the `latprobe` CLI.
//!
//! The binary probes a single HTTP target sequentially: a rate limiter paces
//! dispatches, each probe runs under a hard timeout with a retry policy for
//! transient failures, and successful latencies feed a shared aggregator that
//! keeps raw samples and a fixed-width histogram.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod shutdown;
pub mod shutdown_handlers;
