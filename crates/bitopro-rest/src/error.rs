//! Error types for REST API operations

use bitopro_auth::AuthError;

/// Errors that can occur during REST API operations
///
/// Failures are never retried internally; every error surfaces to the
/// caller exactly once.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Authenticated endpoint called without a complete credential set.
    /// Raised before any network I/O.
    #[error("authentication required for this endpoint (apiKey, apiSecret, email)")]
    AuthRequired,

    /// Credential construction or payload signing failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Non-2xx response or network-level failure
    #[error("transport error: {message}")]
    Transport {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Response body, when present and decodable as JSON
        body: Option<serde_json::Value>,
        /// Diagnostic message
        message: String,
    },

    /// 2xx response arrived without a body
    #[error("response data undefined")]
    EmptyResponse,

    /// 2xx response body did not decode into the expected shape
    #[error("parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// Status code of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
