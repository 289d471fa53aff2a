#![forbid(unsafe_code)]

//! Error types for the lookup collaborator and configuration.

use std::error::Error;
use std::fmt;

/// Failure of one lookup call.
///
/// Every variant is surfaced to the user as the same retryable notice; the
/// distinction only matters for logs.
#[derive(Debug)]
pub enum LookupError {
    /// The request could not be sent or the body could not be read.
    Transport(Box<dyn Error + Send + Sync>),
    /// The service answered with a non-success status.
    Status(u16),
    /// The body was not a JSON array of records.
    Decode(serde_json::Error),
}

impl LookupError {
    /// Wrap any transport-level failure.
    pub fn transport(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    /// Short machine-readable kind for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "lookup transport error: {err}"),
            Self::Status(code) => write!(f, "lookup failed with HTTP status {code}"),
            Self::Decode(err) => write!(f, "malformed lookup response: {err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err.as_ref()),
            Self::Status(_) => None,
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

/// Invalid configuration detected while wiring up the lookup client.
#[derive(Debug)]
pub enum ConfigError {
    /// The endpoint is not an absolute http(s) URL.
    InvalidEndpoint { endpoint: String, reason: String },
    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { endpoint, reason } => {
                write!(f, "invalid endpoint {endpoint:?}: {reason}")
            }
            Self::Client(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEndpoint { .. } => None,
            Self::Client(err) => Some(err),
        }
    }
}
