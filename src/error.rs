//! Error types for metadata requests.

use thiserror::Error;

/// Errors that can occur when fetching instance metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The request could not be sent or completed (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status other than 200.
    ///
    /// `reason` is the canonical text for `status`, not the phrase the server sent.
    #[error("invalid response: {status} {reason}")]
    InvalidResponse { status: u16, reason: String },

    /// The status line arrived but the body could not be read.
    #[error("failed to read response body: {0}")]
    ReadFailure(#[source] reqwest::Error),

    /// The server answered 200 with a zero-length body.
    #[error("no response received")]
    EmptyResponse,

    /// The metadata server did not answer the probe.
    #[error("metadata server not detected")]
    NotDetected,
}

impl MetadataError {
    /// The HTTP status code, if the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            MetadataError::InvalidResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server answered 404 for the requested path.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether the request ran past the client timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            MetadataError::Transport(e) | MetadataError::ReadFailure(e) => e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MetadataError::InvalidResponse {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "invalid response: 503 Service Unavailable");
        assert_eq!(
            MetadataError::EmptyResponse.to_string(),
            "no response received"
        );
        assert_eq!(
            MetadataError::NotDetected.to_string(),
            "metadata server not detected"
        );
    }

    #[test]
    fn test_status_helpers() {
        let not_found = MetadataError::InvalidResponse {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(not_found.status(), Some(404));
        assert!(not_found.is_not_found());
        assert!(!not_found.is_timeout());

        assert_eq!(MetadataError::EmptyResponse.status(), None);
        assert!(!MetadataError::EmptyResponse.is_not_found());
        assert!(!MetadataError::NotDetected.is_timeout());
    }
}
