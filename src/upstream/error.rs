use thiserror::Error;

/// Failures talking to MetaStats
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("MetaStats returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid upstream configuration: {0}")]
    Config(String),
}

/// Uniform failure of the fetch layer.
///
/// Carries only the upstream message; callers do not branch on the cause.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<UpstreamError> for FetchError {
    fn from(err: UpstreamError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_keeps_upstream_message() {
        let err = FetchError::from(UpstreamError::Status {
            status: 401,
            message: "Invalid auth-token".to_string(),
        });
        assert_eq!(err.message, "MetaStats returned 401: Invalid auth-token");
        assert_eq!(err.to_string(), err.message);
    }
}
