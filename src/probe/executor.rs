use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

use super::outcome::{Outcome, RawResponse, classify};
use super::target::ProbeTarget;

/// One classified attempt and how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub outcome: Outcome,
    pub latency_ms: u64,
}

/// Performs a single GET against the target under a hard deadline.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, target: &ProbeTarget, timeout: Duration) -> Attempt;
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// Builds the executor with the default client settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new() -> Result<Self, HttpError> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| HttpError::BuildClientFailed { source: err })?;
        Ok(Self { client })
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, target: &ProbeTarget, timeout: Duration) -> Attempt {
        let start = Instant::now();
        let deadline = start.checked_add(timeout).unwrap_or(start);

        let sent = timeout_at(deadline, self.client.get(target.url().clone()).send()).await;
        let latency_ms = elapsed_ms(start);

        let raw = match sent {
            Err(_elapsed) => RawResponse::TimedOut,
            Ok(Err(err)) if err.is_timeout() => RawResponse::TimedOut,
            Ok(Err(err)) => RawResponse::Transport(err.to_string()),
            Ok(Ok(response)) => {
                let status = response.status().as_u16();
                match timeout_at(deadline, drain_response_body(response)).await {
                    Ok(Ok(bytes)) => debug!("Drained {} body bytes", bytes),
                    Ok(Err(err)) => debug!("Failed to read response body: {}", err),
                    Err(_elapsed) => debug!("Response body not drained before deadline"),
                }
                RawResponse::Status(status)
            }
        };

        Attempt {
            outcome: classify(raw, latency_ms),
            latency_ms,
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
