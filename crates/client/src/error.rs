//! Errors returned by the orders API client.

use thiserror::Error;

/// Errors that can occur when fetching orders.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (DNS, connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Unauthorized (missing or invalid API key); `status` is 401 or 403.
    #[error("Unauthorized ({status}): invalid API key")]
    Unauthorized { status: u16 },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// API key is not a valid header value.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),
}

impl FetchError {
    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Unauthorized { status } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::InvalidUrl(_) | Self::InvalidApiKey(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = FetchError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_unauthorized_reports_actual_status() {
        let forbidden = FetchError::Unauthorized { status: 403 };
        assert_eq!(forbidden.status(), Some(403));
        assert_eq!(forbidden.to_string(), "Unauthorized (403): invalid API key");

        assert_eq!(FetchError::Unauthorized { status: 401 }.status(), Some(401));
    }

    #[test]
    fn test_not_found_display() {
        let err = FetchError::NotFound("order 42".to_string());
        assert_eq!(err.to_string(), "Not found: order 42");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_parse_error_has_no_status() {
        let err = FetchError::Parse("expected a JSON array".to_string());
        assert_eq!(err.status(), None);
    }
}
