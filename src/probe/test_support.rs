use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::{Attempt, Outcome, ProbeTarget, RequestExecutor};

/// Replays a fixed list of outcomes, then repeats `fallback` forever.
pub(crate) struct ScriptedExecutor {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    attempt_duration: Duration,
    calls: AtomicU64,
}

impl ScriptedExecutor {
    pub(crate) fn new<I>(script: I, fallback: Outcome) -> Self
    where
        I: IntoIterator<Item = Outcome>,
    {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            attempt_duration: Duration::ZERO,
            calls: AtomicU64::new(0),
        }
    }

    /// Every attempt sleeps this long before returning (paused-time tests).
    pub(crate) const fn with_attempt_duration(mut self, duration: Duration) -> Self {
        self.attempt_duration = duration;
        self
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, _target: &ProbeTarget, _timeout: Duration) -> Attempt {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.attempt_duration.is_zero() {
            tokio::time::sleep(self.attempt_duration).await;
        }
        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        let outcome = next.unwrap_or_else(|| self.fallback.clone());
        let latency_ms = match outcome {
            Outcome::Success { latency_ms } => latency_ms,
            Outcome::RateLimited
            | Outcome::ClientError { .. }
            | Outcome::ServerError { .. }
            | Outcome::Timeout
            | Outcome::TransportError { .. }
            | Outcome::OtherHttpError { .. } => 0,
        };
        Attempt {
            outcome,
            latency_ms,
        }
    }
}

pub(crate) fn test_target() -> Result<ProbeTarget, String> {
    ProbeTarget::parse("http://127.0.0.1:9/").map_err(|err| err.to_string())
}

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Like [`run_async_test`] with tokio time paused and auto-advancing.
pub(crate) fn run_paused_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Serves `status` to every request after `delay`. Returns the base URL.
pub(crate) async fn spawn_status_server(status: u16, delay: Duration) -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buffer = [0u8; 1024];
                if stream.read(&mut buffer).await.is_err() {
                    return;
                }
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let response = format!(
                    "HTTP/1.1 {} Test\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
                    status
                );
                if stream.write_all(response.as_bytes()).await.is_err() {
                    return;
                }
                drop(stream.shutdown().await);
            });
        }
    });

    Ok(format!("http://{}/", addr))
}
