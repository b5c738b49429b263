//! Error types

use std::time::Duration;

use thiserror::Error;

use crate::retry::{is_retryable_status, IsRetryable};
use crate::surface::Element;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FeedError>;

/// cardfeed error type
#[derive(Debug, Error)]
pub enum FeedError {
    /// A required display element is absent
    #[error("element not found: {0}")]
    MissingElement(Element),

    /// Card selector failed to parse
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    /// Transport-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
        retry_after: Option<Duration>,
    },

    /// Base URL could not be parsed
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A response arrived for a page that is not in flight
    #[error("response for page {got} does not match in-flight page {expected:?}")]
    UnexpectedPage { got: u32, expected: Option<u32> },

    /// Configuration file could not be parsed
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IsRetryable for FeedError {
    fn is_retryable(&self) -> bool {
        match self {
            FeedError::Request(e) => e.is_timeout() || e.is_connect(),
            FeedError::Status { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            FeedError::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FeedError {
    fn from(err: toml::de::Error) -> Self {
        FeedError::Config(err.to_string())
    }
}
