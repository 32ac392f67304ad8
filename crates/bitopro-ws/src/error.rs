//! WebSocket error types

use bitopro_auth::AuthError;
use thiserror::Error;

/// Errors from opening or driving a WebSocket channel
#[derive(Error, Debug)]
pub enum WsError {
    /// A private channel was requested without credentials
    #[error("authentication required: this channel needs API credentials")]
    AuthRequired,

    /// Signing the connection headers failed
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// WebSocket handshake or protocol failure
    #[error("websocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// SOCKS5 tunnel to the stream host failed
    #[error("proxy error: {0}")]
    Proxy(#[from] tokio_socks::Error),

    /// TCP connect failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream URL could not be turned into a connection request
    #[error("invalid stream url: {0}")]
    InvalidUrl(String),

    /// Operation on a channel that already reached its terminal state
    #[error("channel closed")]
    Closed,
}

/// Result alias for WebSocket operations
pub type WsResult<T> = Result<T, WsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            WsError::AuthRequired.to_string(),
            "authentication required: this channel needs API credentials"
        );
        assert_eq!(WsError::Closed.to_string(), "channel closed");
    }
}
