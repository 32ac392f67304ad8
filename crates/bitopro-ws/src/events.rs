//! Channel lifecycle events and states

/// Lifecycle state of one channel
///
/// `Closed` is terminal; a closed channel never reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Handshake in progress
    Connecting,
    /// Connected, messages flowing
    Open,
    /// Closed by either side
    Closed,
}

/// Lifecycle events of one channel
///
/// `Opened` is always emitted first. `Errored` is informational and does
/// not change the channel state; the caller decides whether to close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Handshake completed
    Opened,
    /// A read or write on the socket failed
    Errored {
        /// Human-readable failure description
        message: String,
    },
    /// The channel reached its terminal state
    Closed,
}
