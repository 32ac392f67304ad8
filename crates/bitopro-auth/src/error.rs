//! Error types for authentication operations

/// Errors that can occur while building credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required credential field is empty
    #[error("incomplete credentials: {0} is empty (apiKey, apiSecret and email are all required)")]
    MissingField(&'static str),

    /// Environment variable not set
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Failed to serialize the signing body
    #[error("failed to encode signing payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("BITOPRO_API_KEY".to_string());
        assert!(err.to_string().contains("BITOPRO_API_KEY"));

        let err = AuthError::MissingField("email");
        assert!(err.to_string().contains("email"));
    }
}
