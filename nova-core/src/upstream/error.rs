use std::fmt;

use thiserror::Error;
use tracing::warn;

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Failure talking to a third-party provider.
///
/// `endpoint` is always the provider name plus the request path. Query
/// strings are never included because they may carry API keys.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },
    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("unexpected response body from {endpoint}: {detail}")]
    Decode { endpoint: String, detail: String },
    #[error("failed to reach {endpoint}: {detail}")]
    Transport { endpoint: String, detail: String },
    #[error("invalid upstream base URL `{url}`")]
    InvalidBaseUrl { url: String },
    #[error("invalid upstream client configuration: {detail}")]
    InvalidConfig { detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Timeout,
    Status,
    Decode,
    Transport,
    Config,
}

impl UpstreamErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamErrorKind::Timeout => "timeout",
            UpstreamErrorKind::Status => "status",
            UpstreamErrorKind::Decode => "decode",
            UpstreamErrorKind::Transport => "transport",
            UpstreamErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl UpstreamError {
    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            UpstreamError::Timeout { .. } => UpstreamErrorKind::Timeout,
            UpstreamError::Status { .. } => UpstreamErrorKind::Status,
            UpstreamError::Decode { .. } => UpstreamErrorKind::Decode,
            UpstreamError::Transport { .. } => UpstreamErrorKind::Transport,
            UpstreamError::InvalidBaseUrl { .. }
            | UpstreamError::InvalidConfig { .. } => UpstreamErrorKind::Config,
        }
    }

    pub(crate) fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        // reqwest renders the full URL, query string included.
        let err = err.without_url();
        if err.is_timeout() {
            UpstreamError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else if err.is_decode() {
            UpstreamError::Decode {
                endpoint: endpoint.to_string(),
                detail: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            UpstreamError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            }
        } else {
            UpstreamError::Transport {
                endpoint: endpoint.to_string(),
                detail: err.to_string(),
            }
        }
    }
}

/// Collapse an upstream failure into an empty value, logging what was lost.
pub trait Fallback<T> {
    /// Return `T::default()` on failure. Used for list lookups.
    fn or_empty(self, op: &str) -> T
    where
        T: Default;

    /// Return `None` on failure. Used for single-item lookups.
    fn or_none(self, op: &str) -> Option<T>;
}

impl<T> Fallback<T> for UpstreamResult<T> {
    fn or_empty(self, op: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!(op, kind = %err.kind(), error = %err, "upstream call failed; returning empty result");
                T::default()
            }
        }
    }

    fn or_none(self, op: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(op, kind = %err.kind(), error = %err, "upstream call failed; returning null");
                None
            }
        }
    }
}
