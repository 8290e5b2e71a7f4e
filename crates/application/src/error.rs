//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed classification of search failures
///
/// Presentation layers map the kind, not the message, to user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorKind {
    /// Address or place could not be resolved
    NotFound,
    /// Upstream quota exceeded
    RateLimited,
    /// Upstream service temporarily down
    ServiceUnavailable,
    /// Request or upstream gateway timed out
    Timeout,
    /// Input rejected as malformed
    InvalidRequest,
    /// Upstream returned an unexpected payload
    InvalidResponse,
    /// Connection failure or other transient transport problem
    NetworkError,
    /// Local misconfiguration
    Configuration,
}

impl SearchErrorKind {
    /// Whether an identical request may succeed later
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::Timeout | Self::NetworkError
        )
    }

    /// Stable machine-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Timeout => "timeout",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidResponse => "invalid_response",
            Self::NetworkError => "network_error",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for SearchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Lookup matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited {
        /// Seconds to wait, if the service said so
        retry_after_secs: Option<u64>,
    },

    /// Upstream service temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timed out
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Request rejected as invalid
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream payload could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> SearchErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidRequest(_) => SearchErrorKind::InvalidRequest,
            Self::NotFound(_) => SearchErrorKind::NotFound,
            Self::RateLimited { .. } => SearchErrorKind::RateLimited,
            Self::ServiceUnavailable(_) => SearchErrorKind::ServiceUnavailable,
            Self::Timeout(_) => SearchErrorKind::Timeout,
            Self::InvalidResponse(_) => SearchErrorKind::InvalidResponse,
            Self::Network(_) => SearchErrorKind::NetworkError,
            Self::Configuration(_) => SearchErrorKind::Configuration,
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}
