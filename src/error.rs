//! Error types for the ThreatExchange client
//!
//! Every public API returns `Result<T, Error>`. API failures are classified
//! into a small taxonomy (see [`ErrorKind`]) so callers can branch on the
//! kind of failure without matching on raw Graph API codes.

use serde_json::Value;
use thiserror::Error;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure, unparsable body or unclassified API error
    Generic,
    /// Invalid or expired access token
    Authentication,
    /// Quota or throttling signal
    RateLimit,
    /// Missing object
    NotFound,
    /// Insufficient grant
    Permission,
    /// Malformed request parameters
    Validation,
}

/// The main error type for the ThreatExchange client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("{}", coded(.code, .message))]
    Generic {
        message: String,
        code: Option<i64>,
        /// Raw error envelope, when the failure came from the API
        details: Option<Value>,
    },

    #[error("{}", coded(.code, .message))]
    Authentication { message: String, code: Option<i64> },

    #[error("{}", coded(.code, .message))]
    RateLimit {
        message: String,
        code: Option<i64>,
        /// Seconds the server asked us to wait
        retry_after: u64,
    },

    #[error("{}", coded(.code, .message))]
    NotFound { message: String, code: Option<i64> },

    #[error("{}", coded(.code, .message))]
    Permission { message: String, code: Option<i64> },

    #[error("{}", coded(.code, .message))]
    Validation { message: String, code: Option<i64> },

    // ============================================================================
    // Transport and Local Errors
    // ============================================================================
    /// Transport failure; the request URL is stripped since it carries the token
    #[error("Request failed: {0}")]
    Http(reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.without_url())
    }
}

fn coded(code: &Option<i64>, message: &str) -> String {
    match code {
        Some(code) if *code != 0 => format!("[{code}] {message}"),
        _ => message.to_string(),
    }
}

impl Error {
    /// Create a generic error with no code
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// Create a validation error raised before any request is sent
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: None,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Permission { .. } => ErrorKind::Permission,
            Error::Validation { .. } => ErrorKind::Validation,
            _ => ErrorKind::Generic,
        }
    }

    /// Numeric error code, if the failure carried one
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Generic { code, .. }
            | Error::Authentication { code, .. }
            | Error::RateLimit { code, .. }
            | Error::NotFound { code, .. }
            | Error::Permission { code, .. }
            | Error::Validation { code, .. } => *code,
            Error::Http(e) => e.status().map(|s| i64::from(s.as_u16())),
            _ => None,
        }
    }

    /// Retry-after hint in seconds (rate-limit failures only)
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this error can be recovered by waiting and retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimit { .. })
    }
}

/// Result type alias for the ThreatExchange client
pub type Result<T> = std::result::Result<T, Error>;
