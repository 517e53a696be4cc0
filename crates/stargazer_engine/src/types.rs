use std::fmt;
use std::io;

use stargazer_core::{RemotePage, RequestId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A live request finished. Cancelled requests never produce an event.
    Completed {
        request: RequestId,
        result: Result<RemotePage, FetchError>,
    },
}

/// Failure of a remote search. `message` is the best human-readable text available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure to bring up the fetch worker. Never reported as a request result.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("failed to build the http client: {0}")]
    Client(#[source] FetchError),
    #[error("failed to start the fetch worker: {0}")]
    Worker(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read starred storage: {0}")]
    Read(#[source] io::Error),
    #[error("failed to parse starred storage: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize starred set: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write starred storage: {0}")]
    Write(#[source] io::Error),
}
