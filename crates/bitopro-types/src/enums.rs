//! Order-related enums with BitoPro wire spellings

use serde::{Deserialize, Serialize};

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    /// Buy order
    #[serde(rename = "BUY")]
    Buy,
    /// Sell order
    #[serde(rename = "SELL")]
    Sell,
}

impl OrderAction {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for OrderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit order at a fixed price
    #[serde(rename = "LIMIT")]
    Limit,
    /// Market order at the best available price
    #[serde(rename = "MARKET")]
    Market,
    /// Limit order triggered once the stop price is reached
    #[serde(rename = "STOP_LIMIT")]
    StopLimit,
}

impl OrderType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::StopLimit => "STOP_LIMIT",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force condition
///
/// Market orders are always treated as GTC by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled (default)
    #[serde(rename = "GTC")]
    Gtc,
    /// Rest in the book or be cancelled
    #[serde(rename = "POST_ONLY")]
    PostOnly,
}

impl Default for TimeInForce {
    fn default() -> Self {
        Self::Gtc
    }
}

/// Order status codes as reported by the exchange
///
/// The REST and WebSocket APIs both carry the numeric code; use
/// [`OrderStatus::from_code`] to interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// -1, stop-limit order waiting for its trigger
    NotTriggered,
    /// 0, accepted, in progress
    New,
    /// 1, in progress with a partial fill
    Wait,
    /// 2, completed
    Complete,
    /// 3, completed with a partial fill
    PartialComplete,
    /// 4, cancelled
    Cancelled,
    /// 6, cancelled because the post-only condition failed
    PostOnlyCancelled,
}

impl OrderStatus {
    /// Interpret a numeric status code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::NotTriggered),
            0 => Some(Self::New),
            1 => Some(Self::Wait),
            2 => Some(Self::Complete),
            3 => Some(Self::PartialComplete),
            4 => Some(Self::Cancelled),
            6 => Some(Self::PostOnlyCancelled),
            _ => None,
        }
    }

    /// Numeric code carried on the wire
    pub fn code(&self) -> i32 {
        match self {
            Self::NotTriggered => -1,
            Self::New => 0,
            Self::Wait => 1,
            Self::Complete => 2,
            Self::PartialComplete => 3,
            Self::Cancelled => 4,
            Self::PostOnlyCancelled => 6,
        }
    }

    /// Check if the order can still trade
    pub fn is_active(&self) -> bool {
        matches!(self, Self::NotTriggered | Self::New | Self::Wait)
    }

    /// Check if the order reached a terminal state
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}
