use std::fmt;

use serde::Serialize;

/// What came back from one HTTP attempt, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    Status(u16),
    TimedOut,
    Transport(String),
}

/// Classified result of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { latency_ms: u64 },
    RateLimited,
    ClientError { status: u16 },
    ServerError { status: u16 },
    Timeout,
    TransportError { message: String },
    OtherHttpError { status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    RateLimited,
    ClientError,
    ServerError,
    Timeout,
    TransportError,
    OtherHttpError,
}

/// Maps a raw attempt result to an [`Outcome`].
///
/// 2xx is success, 429 is rate limited, the remaining 4xx and 5xx are client
/// and server errors, and anything else with a status (1xx, 3xx, >599) is an
/// other HTTP error.
#[must_use]
pub fn classify(raw: RawResponse, latency_ms: u64) -> Outcome {
    match raw {
        RawResponse::Status(status) => match status {
            200..=299 => Outcome::Success { latency_ms },
            429 => Outcome::RateLimited,
            400..=499 => Outcome::ClientError { status },
            500..=599 => Outcome::ServerError { status },
            _ => Outcome::OtherHttpError { status },
        },
        RawResponse::TimedOut => Outcome::Timeout,
        RawResponse::Transport(message) => Outcome::TransportError { message },
    }
}

impl Outcome {
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success { .. } => OutcomeKind::Success,
            Outcome::RateLimited => OutcomeKind::RateLimited,
            Outcome::ClientError { .. } => OutcomeKind::ClientError,
            Outcome::ServerError { .. } => OutcomeKind::ServerError,
            Outcome::Timeout => OutcomeKind::Timeout,
            Outcome::TransportError { .. } => OutcomeKind::TransportError,
            Outcome::OtherHttpError { .. } => OutcomeKind::OtherHttpError,
        }
    }

    /// Status code for outcomes that carry one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Outcome::RateLimited => Some(429),
            Outcome::ClientError { status }
            | Outcome::ServerError { status }
            | Outcome::OtherHttpError { status } => Some(*status),
            Outcome::Success { .. } | Outcome::Timeout | Outcome::TransportError { .. } => None,
        }
    }
}

impl OutcomeKind {
    /// Transient kinds are worth another attempt; client and server errors
    /// point at a persistent fault.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        match self {
            OutcomeKind::RateLimited
            | OutcomeKind::Timeout
            | OutcomeKind::TransportError
            | OutcomeKind::OtherHttpError => true,
            OutcomeKind::Success | OutcomeKind::ClientError | OutcomeKind::ServerError => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { latency_ms } => write!(f, "success ({}ms)", latency_ms),
            Outcome::RateLimited => f.write_str("rate limited (429)"),
            Outcome::ClientError { status } => write!(f, "client error ({})", status),
            Outcome::ServerError { status } => write!(f, "server error ({})", status),
            Outcome::Timeout => f.write_str("timeout"),
            Outcome::TransportError { message } => write!(f, "transport error: {}", message),
            Outcome::OtherHttpError { status } => write!(f, "unexpected status ({})", status),
        }
    }
}
