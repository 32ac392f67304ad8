//! Stream channel definitions and URL construction

use std::fmt;

/// Default WebSocket stream base URL
pub const BASE_URL: &str = "wss://stream.bitopro.com:9443/ws/v1";

/// Order book depth, levels per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookDepth {
    /// Top of book only
    D1,
    /// 5 levels (server default)
    #[default]
    D5,
    /// 10 levels
    D10,
    /// 20 levels
    D20,
}

impl BookDepth {
    /// Wire representation used in the pair selector
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D1 => "1",
            Self::D5 => "5",
            Self::D10 => "10",
            Self::D20 => "20",
        }
    }
}

impl fmt::Display for BookDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subscribable stream
///
/// Public channels push market data; the `ActiveOrders` and
/// `AccountBalance` channels require authentication headers on the
/// handshake. Each variant maps to exactly one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChannel {
    /// Order book of one pair, pushed every second when updated
    OrderBook {
        /// Trading pair in `${BASE}_${QUOTE}` format
        pair: String,
        /// Levels per side
        depth: BookDepth,
    },
    /// Order books of several pairs over one connection
    OrderBooks {
        /// Trading pairs
        pairs: Vec<String>,
        /// Levels per side, shared by every pair
        depth: BookDepth,
    },
    /// 24h rolling-window statistics of one pair
    Ticker {
        /// Trading pair
        pair: String,
    },
    /// 24h rolling-window statistics of several pairs
    Tickers {
        /// Trading pairs
        pairs: Vec<String>,
    },
    /// Public trades of one pair
    Trade {
        /// Trading pair
        pair: String,
    },
    /// Public trades of several pairs
    Trades {
        /// Trading pairs
        pairs: Vec<String>,
    },
    /// The caller's active orders; full snapshot first, then updates
    ActiveOrders,
    /// The caller's account balance
    AccountBalance,
}

impl StreamChannel {
    /// URL path (and query) below the stream base URL
    ///
    /// Single-pair channels embed the selector in the path; multi-pair
    /// channels join selectors with commas into one `pairs=` query value.
    pub fn path(&self) -> String {
        match self {
            Self::OrderBook { pair, depth } => {
                format!("/pub/order-books/{}:{}", pair, depth)
            }
            Self::OrderBooks { pairs, depth } => {
                let selectors: Vec<String> = pairs
                    .iter()
                    .map(|pair| format!("{}:{}", pair, depth))
                    .collect();
                format!("/pub/order-books?pairs={}", selectors.join(","))
            }
            Self::Ticker { pair } => format!("/pub/tickers/{}", pair),
            Self::Tickers { pairs } => format!("/pub/tickers?pairs={}", pairs.join(",")),
            Self::Trade { pair } => format!("/pub/trades/{}", pair),
            Self::Trades { pairs } => format!("/pub/trades?pairs={}", pairs.join(",")),
            Self::ActiveOrders => "/pub/auth/orders".to_string(),
            Self::AccountBalance => "/pub/auth/account-balance".to_string(),
        }
    }

    /// Check if this channel needs authentication headers on the handshake
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::ActiveOrders | Self::AccountBalance)
    }

    /// Short name used in log lines and lifecycle diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrderBook { .. } => "OrderBook",
            Self::OrderBooks { .. } => "OrderBooks",
            Self::Ticker { .. } => "Ticker",
            Self::Tickers { .. } => "Tickers",
            Self::Trade { .. } => "Trade",
            Self::Trades { .. } => "Trades",
            Self::ActiveOrders => "ActiveOrders",
            Self::AccountBalance => "AccountBalance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair_selector_in_path() {
        let channel = StreamChannel::OrderBook {
            pair: "BTC_USDT".to_string(),
            depth: BookDepth::D5,
        };
        assert_eq!(channel.path(), "/pub/order-books/BTC_USDT:5");
    }

    #[test]
    fn test_multi_pair_selectors_in_query() {
        let channel = StreamChannel::OrderBooks {
            pairs: vec!["BTC_USDT".to_string(), "ETH_USDT".to_string()],
            depth: BookDepth::D5,
        };
        assert_eq!(
            channel.path(),
            "/pub/order-books?pairs=BTC_USDT:5,ETH_USDT:5"
        );
    }

    #[test]
    fn test_depth_applies_to_every_pair() {
        let channel = StreamChannel::OrderBooks {
            pairs: vec!["BTC_USDT".to_string(), "ETH_USDT".to_string()],
            depth: BookDepth::D20,
        };
        assert_eq!(
            channel.path(),
            "/pub/order-books?pairs=BTC_USDT:20,ETH_USDT:20"
        );
    }

    #[test]
    fn test_ticker_and_trade_paths() {
        assert_eq!(
            StreamChannel::Ticker {
                pair: "btc_usdt".to_string()
            }
            .path(),
            "/pub/tickers/btc_usdt"
        );
        assert_eq!(
            StreamChannel::Trades {
                pairs: vec!["btc_usdt".to_string(), "eth_usdt".to_string()]
            }
            .path(),
            "/pub/trades?pairs=btc_usdt,eth_usdt"
        );
    }

    #[test]
    fn test_requires_auth() {
        assert!(StreamChannel::ActiveOrders.requires_auth());
        assert!(StreamChannel::AccountBalance.requires_auth());
        assert!(!StreamChannel::Ticker {
            pair: "btc_usdt".to_string()
        }
        .requires_auth());
    }

    #[test]
    fn test_auth_channel_paths() {
        assert_eq!(StreamChannel::ActiveOrders.path(), "/pub/auth/orders");
        assert_eq!(
            StreamChannel::AccountBalance.path(),
            "/pub/auth/account-balance"
        );
    }

    #[test]
    fn test_default_depth_is_five() {
        assert_eq!(BookDepth::default(), BookDepth::D5);
        assert_eq!(BookDepth::default().as_str(), "5");
    }
}
