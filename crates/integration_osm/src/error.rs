//! OpenStreetMap service error types

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use thiserror::Error;

/// Errors that can occur while geocoding or querying map data
///
/// The variant is decided once, where the HTTP status or transport failure
/// is first observed. Callers branch on the variant, never on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OsmError {
    /// The lookup matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying (if provided by the service)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable (HTTP 503 and other 5xx)
    #[error("Service unavailable: HTTP {status}")]
    ServiceUnavailable {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Request or upstream gateway timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The service rejected the request as malformed (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body was not the expected JSON shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other non-success HTTP status
    #[error("Request failed: HTTP {status}")]
    Transient {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl OsmError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::ServiceUnavailable { .. }
                | Self::Timeout { .. }
                | Self::ConnectionFailed(_)
                | Self::Transient { .. }
        )
    }

    /// Classify a non-success HTTP status
    ///
    /// `timeout_secs` is reported for gateway timeouts (HTTP 504).
    #[must_use]
    pub fn from_status(status: StatusCode, headers: &HeaderMap, timeout_secs: u64) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest(format!("HTTP {status}")),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited {
                retry_after_secs: retry_after_secs(headers),
            },
            StatusCode::GATEWAY_TIMEOUT => Self::Timeout { timeout_secs },
            s if s.is_server_error() => Self::ServiceUnavailable { status: s.as_u16() },
            s => Self::Transient { status: s.as_u16() },
        }
    }

    /// Classify a transport-level failure
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

/// Parse a `Retry-After` header given in seconds
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn classify(code: u16) -> OsmError {
        let status = StatusCode::from_u16(code).unwrap();
        OsmError::from_status(status, &HeaderMap::new(), 30)
    }

    #[test]
    fn test_retryable_errors() {
        assert!(OsmError::RateLimited { retry_after_secs: None }.is_retryable());
        assert!(OsmError::ServiceUnavailable { status: 503 }.is_retryable());
        assert!(OsmError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(OsmError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(OsmError::Transient { status: 418 }.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!OsmError::NotFound("nowhere".to_string()).is_retryable());
        assert!(!OsmError::InvalidRequest("bad".to_string()).is_retryable());
        assert!(!OsmError::InvalidResponse("html".to_string()).is_retryable());
        assert!(!OsmError::Configuration("empty".to_string()).is_retryable());
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(classify(400), OsmError::InvalidRequest(_)));
        assert_eq!(classify(429), OsmError::RateLimited { retry_after_secs: None });
        assert_eq!(classify(503), OsmError::ServiceUnavailable { status: 503 });
        assert_eq!(classify(500), OsmError::ServiceUnavailable { status: 500 });
        assert_eq!(classify(504), OsmError::Timeout { timeout_secs: 30 });
        assert_eq!(classify(404), OsmError::Transient { status: 404 });
    }

    #[test]
    fn test_retry_after_header() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("60"));
        let err = OsmError::from_status(StatusCode::TOO_MANY_REQUESTS, &headers, 30);
        assert_eq!(
            err,
            OsmError::RateLimited {
                retry_after_secs: Some(60)
            }
        );
    }

    #[test]
    fn test_unparseable_retry_after_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after_secs(&headers), None);
    }

    #[test]
    fn test_error_display() {
        let err = OsmError::RateLimited {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = OsmError::Timeout { timeout_secs: 25 };
        assert!(err.to_string().contains("25"));

        let err = OsmError::ServiceUnavailable { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
