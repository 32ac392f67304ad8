//! REST API client for the BitoPro cryptocurrency exchange
//!
//! This crate provides a typed client for BitoPro's REST v3 API,
//! including market data, account queries and order management.
//!
//! # Features
//!
//! - **Market Data**: currencies, trading pairs, order book, tickers,
//!   recent trades, candlesticks
//! - **Account**: balances, order queries, trade list
//! - **Trading**: create, batch-create, cancel and batch-cancel orders
//!
//! # Authentication
//!
//! Private endpoints sign a base64 JSON payload with HMAC-SHA384 as
//! specified by BitoPro's API documentation; see `bitopro-auth`. A client
//! without credentials serves public endpoints only and fails fast on
//! private ones, before any network I/O.
//!
//! # Example
//!
//! ```no_run
//! use bitopro_rest::{BitoProRestClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BitoProRestClient::new();
//!     let tickers = client.get_tickers("btc_usdt").await?;
//!     println!("BTC/USDT: {:?}", tickers);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BitoProRestClient::with_credentials(creds);
//!     let balance = auth_client.get_balance().await?;
//!     println!("Balances: {:?}", balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Every failure surfaces exactly once, with no internal retry or
//! backoff: configuration errors before any I/O, transport errors with
//! the original status and body attached, and protocol errors when a 2xx
//! response arrives without a usable body.

pub mod client;
mod dispatch;
pub mod endpoints;
pub mod error;
pub mod types;

// Re-export main types
pub use client::{BitoProRestClient, ClientConfig, BASE_URL};
pub use error::{RestError, RestResult};

// Re-export the auth surface callers need to construct a client
pub use bitopro_auth::{Clock, Credentials, FixedClock, SystemClock};

// Re-export endpoint types
pub use types::{
    // Market data
    BookLevel, Candle, Currency, LimitationsAndFees, OrderBook, RecentTrade, Ticker, TradingPair,
    // Account
    AccountBalance, Order, OrderFilter, Trade, TradeFilter,
    // Trading
    BatchOrderEntry, BatchOrderResult, CreateOrderRequest, CreateOrderResponse, OrderIdsByPair,
    // Responses
    Envelope,
};
